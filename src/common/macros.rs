#[macro_export]
macro_rules! log_err {
    // Usage: log_err!(&data, err);
    ($params:expr, $err:expr) => {{
        let location = format!("{}:{}", file!(), line!());

        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::log::error!(
            "{} | parameters: {} | {}",
            location,
            params_json,
            $err
        );
    }};
}

pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "FEDEM_ALLOWED_ORIGINS";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "POSTMARK_AUTH_TOKEN";
    pub const ADMIN_EMAIL_ENV_VAR: &str = "ADMIN_EMAIL";
    pub const OPERATOR_EMAIL_ENV_VAR: &str = "OPERATOR_EMAIL";
    pub const RESET_LINK_BASE_ENV_VAR: &str = "RESET_LINK_BASE";
}

pub mod jwt {
    pub const ISSUER: &str = "SlimPath";
    pub const AUDIENCE: &str = "user";
    pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 900;
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "noreply@fedem.example";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}

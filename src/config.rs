#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    pub stripe_secret_key: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");

        // Tokens are long-lived: one year, expressed in minutes.
        let jwt_maxage = std::env::var("JWT_MAXAGE")
            .unwrap_or_else(|_| "525600".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string());

        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .unwrap_or_else(|_| "test_secret_key".to_string());

        Config {
            database_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().expect("JWT_MAXAGE must be a number of minutes"),
            port: port.parse::<u16>().expect("PORT must be a valid port number"),
            stripe_secret_key,
        }
    }
}

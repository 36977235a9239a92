pub struct Env {
    pub database_url: String,
    pub redis_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub search_page_size: u32,
    pub friend_request_rate_limit: u64,
    pub friend_request_rate_window: u64,
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let redis_url = std::env::var("REDIS_URL")
            .expect("REDIS_URL must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");

        let search_page_size = std::env::var("SEARCH_PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .expect("SEARCH_PAGE_SIZE must be a valid u32 integer");

        let friend_request_rate_limit = std::env::var("FRIEND_REQUEST_RATE_LIMIT")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .expect("FRIEND_REQUEST_RATE_LIMIT must be a valid u64 integer");
        let friend_request_rate_window = std::env::var("FRIEND_REQUEST_RATE_WINDOW")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .expect("FRIEND_REQUEST_RATE_WINDOW must be a valid u64 integer");

        Env {
            database_url,
            redis_url,
            frontend_url,
            ip,
            port,
            search_page_size,
            friend_request_rate_limit,
            friend_request_rate_window,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

use crate::services::reply_tree::OrphanPolicy;

#[derive(Debug)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub sentry_project_link: Option<String>,
    pub orphan_policy: OrphanPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");
        let port: u16 = std::env::var("PORT")
            .unwrap_or("5000".to_string())
            .parse()
            .expect("PORT to be a number");

        let sentry_project_link = std::env::var("SENTRY_PROJECT_LINK").ok();

        let orphan_policy = std::env::var("REPLIES_ORPHAN_POLICY")
            .ok()
            .map(|v| {
                v.parse::<OrphanPolicy>()
                    .expect("REPLIES_ORPHAN_POLICY to be `drop` or `promote`")
            })
            .unwrap_or_default();

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            jwt_secret,
            port,
            sentry_project_link,
            orphan_policy,
        }
    }
}

use crate::auth::jwt::JwtConfig;
use crate::auth::password::hash_password;

/// Default multipart body limit: 20 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// Built once in `main` and shared through [`AppState`](crate::state::AppState).
/// Required values panic at startup when missing so misconfiguration fails
/// fast instead of surfacing on the first request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on request bodies, mostly photo uploads.
    pub max_upload_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Optional bootstrap admin login.
    pub bootstrap: Option<BootstrapCredential>,
    /// Object storage for furniture photos.
    pub storage: StorageConfig,
}

/// The one credential accepted before any user rows exist.
///
/// The password is hashed once at startup so logins verify it the same way
/// as any stored account.
#[derive(Clone)]
pub struct BootstrapCredential {
    pub email: String,
    /// Argon2id PHC string of `BOOTSTRAP_ADMIN_PASSWORD`.
    pub password_hash: String,
}

impl std::fmt::Debug for BootstrapCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapCredential")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// S3 (or S3-compatible) bucket settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    /// Region override; the AWS default provider chain applies when unset.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores. Enables path-style addressing.
    pub endpoint: Option<String>,
    /// Prefix joined with the object key to form the stored photo URL.
    pub public_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                               |
    /// |----------------------------|---------------------------------------|
    /// | `HOST`                     | `0.0.0.0`                             |
    /// | `PORT`                     | `3000`                                |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`               |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                                  |
    /// | `MAX_UPLOAD_BYTES`         | `20971520`                            |
    /// | `BOOTSTRAP_ADMIN_EMAIL`    | unset                                 |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                                 |
    /// | `S3_BUCKET`                | **required**                          |
    /// | `S3_REGION`                | provider chain                        |
    /// | `S3_ENDPOINT`              | unset                                 |
    /// | `S3_PUBLIC_BASE_URL`       | `https://{bucket}.s3.amazonaws.com`   |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            jwt: JwtConfig::from_env(),
            bootstrap: BootstrapCredential::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

impl BootstrapCredential {
    /// Both `BOOTSTRAP_ADMIN_EMAIL` and `BOOTSTRAP_ADMIN_PASSWORD` or neither.
    ///
    /// # Panics
    ///
    /// Panics if only one of the pair is set, or the password is empty.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok();
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok();

        match (email, password) {
            (None, None) => None,
            (Some(email), Some(password)) => {
                assert!(
                    !password.is_empty(),
                    "BOOTSTRAP_ADMIN_PASSWORD must not be empty"
                );
                let password_hash = hash_password(&password)
                    .expect("BOOTSTRAP_ADMIN_PASSWORD could not be hashed");
                Some(Self {
                    email: email.trim().to_lowercase(),
                    password_hash,
                })
            }
            _ => panic!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
        }
    }
}

impl StorageConfig {
    /// # Panics
    ///
    /// Panics if `S3_BUCKET` is not set or is empty.
    pub fn from_env() -> Self {
        let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set in the environment");
        assert!(!bucket.is_empty(), "S3_BUCKET must not be empty");

        let region = std::env::var("S3_REGION").ok().filter(|s| !s.is_empty());
        let endpoint = std::env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());

        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com"))
            .trim_end_matches('/')
            .to_string();

        Self {
            bucket,
            region,
            endpoint,
            public_base_url,
        }
    }
}

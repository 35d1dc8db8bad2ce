// Single source of truth for all default values.

// --- Embedding requests ---
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

// --- Remote provider (OpenAI-compatible) ---
pub const DEFAULT_REMOTE_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_REMOTE_API_URL: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_REMOTE_DIMENSIONS: usize = 1536;

// --- Local inference service ---
pub const DEFAULT_LOCAL_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_LOCAL_API_URL: &str = "http://localhost:5000/embed";
pub const DEFAULT_LOCAL_DIMENSIONS: usize = 384;

// --- Circuit breaker ---
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
pub const DEFAULT_RESET_TIMEOUT_MS: u64 = 30_000;

// --- Cache ---
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

// --- Batch ---
pub const DEFAULT_BATCH_CHUNK_SIZE: usize = 20;
pub const DEFAULT_BATCH_PACING_DELAY_MS: u64 = 1_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";

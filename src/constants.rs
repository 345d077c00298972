//! Common constants used throughout the cfddns application

//==============================================================================
// Cloudflare API Constants
//==============================================================================

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// User agent string for outbound HTTP requests
pub const USER_AGENT: &str = "cfddns/0.1";

/// DNS record type managed by this tool
pub const DNS_RECORD_TYPE_A: &str = "A";

/// TTL sentinel for Cloudflare's "automatic" TTL
pub const DNS_TTL_AUTO: u64 = 1;

/// Records are always routed through Cloudflare's edge proxy
pub const DNS_PROXIED: bool = true;

//==============================================================================
// Public IP Service
//==============================================================================

/// Public IP echo service endpoint (JSON body with an `ip` field)
pub const PUBLIC_IP_ENDPOINT: &str = "https://api.ipify.org?format=json";

//==============================================================================
// Credential Format Constants
//==============================================================================

/// Exact length of a Cloudflare global API key (lowercase hex)
pub const GLOBAL_KEY_LENGTH: usize = 37;

/// Exact length of a Cloudflare API token
pub const API_TOKEN_LENGTH: usize = 40;

/// Number of leading token characters exempt from the alphabet check
pub const API_TOKEN_PREFIX_LENGTH: usize = 4;

//==============================================================================
// Timeout Constants
//==============================================================================

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum HTTP request timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

//==============================================================================
// Validation Constants
//==============================================================================

/// Minimum zone ID length in characters
pub const MIN_ZONE_ID_LENGTH: usize = 16;

/// Maximum zone ID length in characters
pub const MAX_ZONE_ID_LENGTH: usize = 64;

/// Maximum DNS record name length in characters
pub const MAX_RECORD_NAME_LENGTH: usize = 253;

/// Maximum DNS label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

//==============================================================================
// Environment Variable Names
//==============================================================================

/// Environment variable name for the Cloudflare account email
pub const ENV_EMAIL: &str = "CLOUDFLARE_EMAIL";

/// Environment variable name for the Cloudflare API credential
/// (global key or API token; the kind is detected at startup)
pub const ENV_API_KEY: &str = "CLOUDFLARE_API_KEY";

/// Environment variable name for the zone/record mapping (JSON)
pub const ENV_ZONES: &str = "CLOUDFLARE_ZONES";

/// Environment variable name for the HTTP timeout in seconds
pub const ENV_TIMEOUT: &str = "CFDDNS_TIMEOUT";

/// Environment variable name for verbose logging
pub const ENV_VERBOSE: &str = "CFDDNS_VERBOSE";

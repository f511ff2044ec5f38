pub mod openai {
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const COMPLETIONS_ENDPOINT: &str = "/engines/davinci/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
}

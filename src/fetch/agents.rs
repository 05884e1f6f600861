// src/fetch/agents.rs
use rand::seq::SliceRandom;

/// Desktop browser identities rotated across calendar requests.
pub static DESKTOP_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.99 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.99 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.99 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_1) AppleWebKit/602.2.14 (KHTML, like Gecko) Version/10.0.1 Safari/602.2.14",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.71 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.98 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.98 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.71 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.99 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64; rv:50.0) Gecko/20100101 Firefox/50.0",
];

/// Produces the `User-Agent` for the next request.
pub trait UserAgentSource {
    fn user_agent(&self) -> String;
}

impl<F: Fn() -> String> UserAgentSource for F {
    fn user_agent(&self) -> String {
        self()
    }
}

/// Uniform pick from [`DESKTOP_AGENTS`] on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDesktopAgent;

impl UserAgentSource for RandomDesktopAgent {
    fn user_agent(&self) -> String {
        DESKTOP_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FixedAgent(pub String);

impl UserAgentSource for FixedAgent {
    fn user_agent(&self) -> String {
        self.0.clone()
    }
}

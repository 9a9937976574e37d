//! Command-line configuration.

use std::path::PathBuf;

/// Viewer options gathered from `--key=value` style arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub assets: PathBuf,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub bounded: bool,
    pub input_script: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("objetos"),
            width: 1200,
            height: 800,
            seed: 0,
            bounded: false,
            input_script: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Unknown or unparsable arguments are logged and ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        let mut w: Option<u32> = None;
        let mut h: Option<u32> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--assets=") {
                cfg.assets = PathBuf::from(v);
            } else if let Some(v) = arg.strip_prefix("--size=") {
                // Accept: WxH or WXH
                match v.split_once('x').or_else(|| v.split_once('X')) {
                    Some((sw, sh)) => {
                        if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                            w = Some(pw);
                            h = Some(ph);
                        } else {
                            log::warn!("Ignoring malformed size '{}'", v);
                        }
                    }
                    None => log::warn!("Ignoring malformed size '{}'", v),
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                if let Ok(pw) = v.parse::<u32>() {
                    w = Some(pw);
                }
            } else if let Some(v) = arg.strip_prefix("--height=") {
                if let Ok(ph) = v.parse::<u32>() {
                    h = Some(ph);
                }
            } else if let Some(v) = arg.strip_prefix("--seed=") {
                match v.parse::<u64>() {
                    Ok(seed) => cfg.seed = seed,
                    Err(_) => log::warn!("Ignoring malformed seed '{}'", v),
                }
            } else if arg == "--bounded" {
                cfg.bounded = true;
            } else if let Some(v) = arg.strip_prefix("--bounded=") {
                cfg.bounded = matches!(
                    v.to_ascii_lowercase().as_str(),
                    "1" | "true" | "on" | "yes"
                );
            } else if let Some(v) = arg.strip_prefix("--input=") {
                cfg.input_script = Some(PathBuf::from(v));
            } else {
                log::warn!("Unknown argument '{}'", arg);
            }
        }

        // A zero height is legal for the camera (square aspect), but not for a window.
        cfg.width = w.unwrap_or(cfg.width).max(1);
        cfg.height = h.unwrap_or(cfg.height).max(1);
        cfg
    }
}

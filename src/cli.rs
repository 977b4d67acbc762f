use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_FRAMES: u32 = 120;
const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Options of the `flashlight_preview` tool.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOptions {
    pub params: Option<PathBuf>,
    pub frames: u32,
    pub dt: f32,
    pub ground: Option<bool>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self { params: None, frames: DEFAULT_FRAMES, dt: DEFAULT_DT, ground: None }
    }
}

impl PreviewOptions {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = PreviewOptions::default();
        let mut iter = args.into_iter();
        let _ = iter.next(); // program name
        while let Some(raw_flag) = iter.next() {
            let flag = raw_flag.as_ref();
            let Some(key) = flag.strip_prefix("--") else {
                bail!("flashlight_preview takes only --flag value pairs, got '{flag}'");
            };
            let value = iter
                .next()
                .ok_or_else(|| anyhow!("Preview flag '{flag}' needs a value"))?
                .as_ref()
                .to_string();
            match key {
                "params" => options.params = Some(PathBuf::from(value)),
                "frames" => {
                    options.frames = value.parse::<u32>().with_context(|| format!("Invalid frames '{value}'"))?;
                }
                "dt" => {
                    let dt = value.parse::<f32>().with_context(|| format!("Invalid dt '{value}'"))?;
                    if !dt.is_finite() || dt <= 0.0 {
                        bail!("Invalid dt '{value}'. Use a positive number of seconds.");
                    }
                    options.dt = dt;
                }
                "ground" => options.ground = Some(parse_bool_flag("ground", &value)?),
                _ => bail!("Unsupported preview flag '{flag}' (expected --params, --frames, --dt or --ground)"),
            }
        }
        Ok(options)
    }
}

fn parse_bool_flag(flag: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("--{flag} expects on/off, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = ["preview", "--params", "pulse.json", "--frames", "30", "--dt", "0.05", "--ground", "on"];
        let options = PreviewOptions::parse(args).expect("parse options");
        assert_eq!(options.params, Some(PathBuf::from("pulse.json")));
        assert_eq!(options.frames, 30);
        assert!((options.dt - 0.05).abs() < f32::EPSILON);
        assert_eq!(options.ground, Some(true));
    }

    #[test]
    fn defaults_without_flags() {
        let options = PreviewOptions::parse(["preview"]).expect("parse options");
        assert_eq!(options, PreviewOptions::default());
    }

    #[test]
    fn rejects_non_positive_dt() {
        let err = PreviewOptions::parse(["preview", "--dt", "0"]).unwrap_err();
        assert!(err.to_string().contains("Invalid dt"), "zero dt should error");
    }

    #[test]
    fn trailing_params_flag_needs_a_path() {
        let err = PreviewOptions::parse(["preview", "--frames", "10", "--params"]).unwrap_err();
        assert!(err.to_string().contains("'--params' needs a value"), "unexpected error: {err}");
    }

    #[test]
    fn ground_toggle_accepts_on_off_only() {
        let options = PreviewOptions::parse(["preview", "--ground", "OFF"]).expect("parse options");
        assert_eq!(options.ground, Some(false));
        let err = PreviewOptions::parse(["preview", "--ground", "maybe"]).unwrap_err();
        assert!(err.to_string().contains("--ground expects on/off"), "unexpected error: {err}");
    }

    #[test]
    fn bare_path_and_foreign_flags_are_rejected() {
        let err = PreviewOptions::parse(["preview", "pulse.json"]).unwrap_err();
        assert!(err.to_string().contains("'pulse.json'"), "unexpected error: {err}");
        let err = PreviewOptions::parse(["preview", "--width", "800"]).unwrap_err();
        assert!(err.to_string().contains("Unsupported preview flag '--width'"), "unexpected error: {err}");
    }
}

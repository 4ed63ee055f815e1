//! Typed reads of the `SESSION_*` variables.
//!
//! Release builds reject any missing or malformed value. Debug builds log
//! the problem and carry on with the fallback.

use std::path::PathBuf;

use actix_web::cookie::SameSite;
use chrono::TimeDelta;
use mockable::Env;
use tracing::warn;

use super::{
    BuildMode, KEY_FILE_ENV, SAMESITE_ENV, SESSION_KEY_DEFAULT_PATH, SessionConfigError,
    TTL_MINUTES_ENV,
};

const TOGGLE_EXPECTED: &str = "1|0|true|false|yes|no|y|n|on|off";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const MINUTES_EXPECTED: &str = "a positive number of minutes";

/// Whether an unset variable is an error in release builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Reader over the process environment for one build mode.
pub(super) struct SessionEnv<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<'a, E: Env> SessionEnv<'a, E> {
    pub(super) fn new(env: &'a E, mode: BuildMode) -> Self {
        Self { env, mode }
    }

    /// On/off switch that must be set explicitly in release builds.
    pub(super) fn toggle(&self, name: &'static str, fallback: bool) -> Result<bool, SessionConfigError> {
        self.read(name, fallback, Presence::Required, TOGGLE_EXPECTED, parse_toggle)
    }

    /// Cookie `SameSite` policy. `None` is only honoured for secure cookies.
    pub(super) fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let fallback = if self.mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        };
        let policy = self.read(
            SAMESITE_ENV,
            fallback,
            Presence::Required,
            SAMESITE_EXPECTED,
            parse_same_site,
        )?;
        if policy == SameSite::None && !cookie_secure {
            // Debug builds keep `None`; browsers may still drop the cookie.
            return self.tolerate(policy, SessionConfigError::InsecureSameSiteNone);
        }
        Ok(policy)
    }

    /// Absolute session lifetime, `fallback` when unset.
    pub(super) fn ttl(&self, fallback: TimeDelta) -> Result<TimeDelta, SessionConfigError> {
        self.read(
            TTL_MINUTES_ENV,
            fallback,
            Presence::Optional,
            MINUTES_EXPECTED,
            parse_minutes,
        )
    }

    /// Location of the session key file.
    pub(super) fn key_path(&self) -> PathBuf {
        self.env
            .string(KEY_FILE_ENV)
            .map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), PathBuf::from)
    }

    fn read<T>(
        &self,
        name: &'static str,
        fallback: T,
        presence: Presence,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(raw) = self.env.string(name) else {
            return match presence {
                Presence::Required => self.tolerate(fallback, SessionConfigError::MissingEnv { name }),
                Presence::Optional => Ok(fallback),
            };
        };
        match parse(&raw) {
            Some(value) => Ok(value),
            None => self.tolerate(
                fallback,
                SessionConfigError::InvalidEnv {
                    name,
                    value: raw,
                    expected,
                },
            ),
        }
    }

    fn tolerate<T>(&self, fallback: T, error: SessionConfigError) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(error = %error, "session setting falls back to its debug default");
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

fn parse_toggle(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

fn parse_minutes(raw: &str) -> Option<TimeDelta> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .and_then(TimeDelta::try_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;

    fn env_with(name: &'static str, value: Option<&str>) -> MockEnv {
        let value = value.map(str::to_owned);
        let mut env = MockEnv::new();
        env.expect_string()
            .returning(move |key| if key == name { value.clone() } else { None });
        env
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case(" Yes ", Some(true))]
    #[case("on", Some(true))]
    #[case("OFF", Some(false))]
    #[case("n", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn toggles_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_toggle(raw), expected);
    }

    #[rstest]
    #[case("strict", Some(SameSite::Strict))]
    #[case(" LAX", Some(SameSite::Lax))]
    #[case("None", Some(SameSite::None))]
    #[case("sometimes", None)]
    fn same_site_is_case_insensitive(#[case] raw: &str, #[case] expected: Option<SameSite>) {
        assert_eq!(parse_same_site(raw), expected);
    }

    #[rstest]
    #[case(BuildMode::Debug, true)]
    #[case(BuildMode::Release, false)]
    fn missing_toggle_only_tolerated_in_debug(#[case] mode: BuildMode, #[case] ok: bool) {
        let env = env_with("SESSION_COOKIE_SECURE", None);
        let result = SessionEnv::new(&env, mode).toggle("SESSION_COOKIE_SECURE", true);
        assert_eq!(result.is_ok(), ok);
    }

    #[rstest]
    #[case(BuildMode::Debug)]
    #[case(BuildMode::Release)]
    fn unset_ttl_uses_fallback_in_every_mode(#[case] mode: BuildMode) {
        let env = env_with(TTL_MINUTES_ENV, None);
        let ttl = SessionEnv::new(&env, mode)
            .ttl(TimeDelta::minutes(120))
            .expect("optional ttl");
        assert_eq!(ttl, TimeDelta::minutes(120));
    }

    #[rstest]
    fn debug_keeps_insecure_none_policy() {
        let env = env_with(SAMESITE_ENV, Some("None"));
        let policy = SessionEnv::new(&env, BuildMode::Debug)
            .same_site(false)
            .expect("debug tolerates insecure None");
        assert_eq!(policy, SameSite::None);
    }

    #[rstest]
    #[case(Some("/tmp/key"), "/tmp/key")]
    #[case(None, SESSION_KEY_DEFAULT_PATH)]
    fn key_path_defaults_to_secret_mount(#[case] raw: Option<&str>, #[case] expected: &str) {
        let env = env_with(KEY_FILE_ENV, raw);
        let path = SessionEnv::new(&env, BuildMode::Release).key_path();
        assert_eq!(path, PathBuf::from(expected));
    }
}

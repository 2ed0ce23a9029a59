//! Environment normalization helpers.

use std::collections::BTreeMap;
use std::env;

/// Environment variables consulted, in order, for the public site URL.
pub const SITE_URL_ENV_VARS: &[&str] = &["SITE_URL", "VITE_SITE_URL"];

/// Shared environment helper utilities.
///
/// Reads the process environment unless built with [`EnvHelper::fixed`], in which case only the
/// given variables are visible.
#[derive(Clone, Debug, Default)]
pub struct EnvHelper {
    fixed: Option<BTreeMap<String, String>>,
}

impl EnvHelper {
    /// Helper that sees exactly `vars` and nothing from the process environment.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fixed: Some(
                vars.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }

    /// Look up one variable.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.fixed {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }

    /// Return the first value that is set and not blank, in the given order.
    pub fn first_non_empty<I, S>(values: I) -> Option<String>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        values
            .into_iter()
            .flatten()
            .map(Into::into)
            .find(|value| !value.trim().is_empty())
    }

    /// Raw site URL override: `SITE_URL`, then `VITE_SITE_URL`, skipping blank values.
    pub fn site_url_override(&self) -> Option<String> {
        Self::first_non_empty(SITE_URL_ENV_VARS.iter().map(|name| self.var(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_empty_skips_unset_and_blank_values() {
        assert_eq!(
            EnvHelper::first_non_empty([None, Some(""), Some("https://a.ng")]),
            Some("https://a.ng".to_string())
        );
        assert_eq!(EnvHelper::first_non_empty::<_, &str>([None, Some("  ")]), None);
    }

    #[test]
    fn site_url_prefers_site_url_over_vite_site_url() {
        let both = EnvHelper::fixed([
            ("VITE_SITE_URL", "https://vite.ng"),
            ("SITE_URL", "https://site.ng"),
        ]);
        assert_eq!(both.site_url_override().as_deref(), Some("https://site.ng"));

        let blank_primary = EnvHelper::fixed([
            ("SITE_URL", "   "),
            ("VITE_SITE_URL", "https://vite.ng"),
        ]);
        assert_eq!(
            blank_primary.site_url_override().as_deref(),
            Some("https://vite.ng")
        );

        let none = EnvHelper::fixed::<_, &str, &str>([]);
        assert_eq!(none.site_url_override(), None);
    }
}

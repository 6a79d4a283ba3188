use std::collections::HashMap;
use std::path::Path;

// EnvSnapshot is a frozen copy of environment variables

// The provider reads from it instead of std::env, so tests can hand it
// any environment they like without touching the process
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current process environment. Variables whose name or
    /// value is not valid unicode are skipped.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Captures the process environment on top of `.env` from the working
    /// directory. See `capture_with_dotenv_file`.
    pub fn capture_with_dotenv() -> Self {
        Self::capture_with_dotenv_file(".env")
    }

    /// Reads `path` as a `.env` file and overlays the process environment on
    /// top of it, so variables already set in the process win. A missing or
    /// unreadable file gives a plain `capture()`, and a malformed line ends
    /// the read at that line. The process environment is never written.
    pub fn capture_with_dotenv_file(path: impl AsRef<Path>) -> Self {
        let mut snapshot: Self = match dotenvy::from_path_iter(path.as_ref()) {
            Ok(iter) => iter.map_while(Result::ok).collect(),
            Err(_) => Self::new(),
        };
        snapshot.extend(Self::capture().vars);
        snapshot
    }

    /// Parses a `.env` file without modifying the process environment.
    ///
    /// dotenvy expands `$VAR` and `${VAR}` in unquoted and double-quoted
    /// values. Wrap values containing a literal `$` (passwords in
    /// `DATABASE_URL`, say) in single quotes to keep them verbatim.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", path.display()))?;

        let mut snapshot = Self::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
            snapshot.vars.insert(key, value);
        }

        Ok(snapshot)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like `get`, but an empty value counts as unset. No trimming: a value
    /// of only spaces is returned as-is.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        snapshot.extend(iter);
        snapshot
    }
}

impl<K, V> Extend<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.vars
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

//! The remote base address as a value type, so the trailing-slash and
//! root-floor invariants live in one place instead of ad hoc string surgery.

/// Separators at or before this offset belong to the scheme prefix
/// (`"ftp://"` is 6 characters), not the path; `ascend` never strips past it.
pub const SCHEME_PREFIX_LEN: usize = "ftp://".len();

/// The current remote location. Empty until the first `connect`; after any
/// mutation it ends with exactly one trailing `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteBase(String);

impl RemoteBase {
    /// Append a trailing separator if absent; idempotent
    pub fn normalize(url: &str) -> String {
        if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        }
    }

    pub fn set(&mut self, url: &str) {
        self.0 = Self::normalize(url);
    }

    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full address of a child entry under the current base
    pub fn resolve(&self, name: &str) -> String {
        format!("{}{}", self.0, name)
    }

    /// Enter a subdirectory. Purely textual; whether the target exists is
    /// discovered on the next listing or transfer.
    pub fn descend(&mut self, name: &str) {
        self.0 = Self::normalize(&format!("{}{}", self.0, name));
    }

    /// Strip the final path segment, with a floor at the server root:
    /// ascending from `ftp://host/` leaves the base unchanged.
    pub fn ascend(&mut self) {
        let Some(head) = self.0.strip_suffix('/') else {
            return;
        };
        if let Some(pos) = head.rfind('/') {
            if pos >= SCHEME_PREFIX_LEN {
                self.0.truncate(pos + 1);
            }
        }
    }

    /// Last path segment, for the prompt; empty while not connected
    pub fn last_segment(&self) -> &str {
        let trimmed = self.0.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_exactly_one_slash() {
        assert_eq!(RemoteBase::normalize("ftp://host"), "ftp://host/");
        assert_eq!(RemoteBase::normalize("ftp://host/"), "ftp://host/");
        assert!(RemoteBase::normalize("ftp://host/a").ends_with('/'));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = RemoteBase::normalize("ftp://host/a");
        assert_eq!(RemoteBase::normalize(&once), once);
    }

    #[test]
    fn descend_then_ascend_round_trips() {
        let mut base = RemoteBase::default();
        base.set("ftp://host/a/");
        base.descend("b");
        assert_eq!(base.as_str(), "ftp://host/a/b/");
        base.ascend();
        assert_eq!(base.as_str(), "ftp://host/a/");
    }

    #[test]
    fn ascend_stops_at_server_root() {
        let mut base = RemoteBase::default();
        base.set("ftp://host/");
        base.ascend();
        assert_eq!(base.as_str(), "ftp://host/");
    }

    #[test]
    fn ascend_walks_up_to_the_root_and_no_further() {
        let mut base = RemoteBase::default();
        base.set("ftp://host/a/b");
        base.ascend();
        base.ascend();
        base.ascend();
        assert_eq!(base.as_str(), "ftp://host/");
    }

    #[test]
    fn ascend_on_unset_base_is_a_no_op() {
        let mut base = RemoteBase::default();
        base.ascend();
        assert!(!base.is_set());
    }

    #[test]
    fn resolve_builds_child_addresses() {
        let mut base = RemoteBase::default();
        base.set("ftp://host/pub");
        assert_eq!(base.resolve("file.txt"), "ftp://host/pub/file.txt");
    }

    #[test]
    fn last_segment_for_prompt() {
        let mut base = RemoteBase::default();
        assert_eq!(base.last_segment(), "");
        base.set("ftp://host/");
        assert_eq!(base.last_segment(), "host");
        base.descend("pub");
        assert_eq!(base.last_segment(), "pub");
    }
}

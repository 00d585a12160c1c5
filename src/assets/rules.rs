//! Candidate root rules
//!
//! An ordered list of mount rules decides where a request may live. Each
//! rule applies to requests under its prefix and maps them onto a root
//! directory, optionally dropping the prefix first.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRule {
    /// Request prefix this rule applies to; empty matches everything
    pub prefix: String,
    /// Directory searched for matching requests
    pub root: PathBuf,
    /// Drop `prefix` from the request before joining it to `root`
    pub strip_prefix: bool,
}

impl MountRule {
    /// A rule that serves every request from `root` unchanged
    pub fn catch_all(root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: String::new(),
            root: root.into(),
            strip_prefix: false,
        }
    }

    /// A rule for requests under `prefix`, served from `root` without it
    pub fn stripped(prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            root: root.into(),
            strip_prefix: true,
        }
    }

    /// Location this rule proposes for `path`, or `None` if it does not apply
    ///
    /// The prefix only matches whole segments, so `media` covers
    /// `media/a.png` but not `mediakit/a.png`.
    pub fn candidate(&self, path: &str) -> Option<PathBuf> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if !self.on_boundary(rest) {
            return None;
        }
        let suffix = if self.strip_prefix { rest } else { path };
        Some(join(&self.root, suffix))
    }

    fn on_boundary(&self, rest: &str) -> bool {
        self.prefix.is_empty()
            || self.prefix.ends_with('/')
            || rest.is_empty()
            || rest.starts_with('/')
    }
}

fn join(root: &Path, suffix: &str) -> PathBuf {
    suffix
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Candidate locations for `path`, in priority order
pub fn candidates<'a>(
    rules: &'a [MountRule],
    path: &'a str,
) -> impl Iterator<Item = PathBuf> + 'a {
    rules.iter().filter_map(move |rule| rule.candidate(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rules() -> Vec<MountRule> {
        vec![
            MountRule::stripped("admin/", "/srv/framework/admin"),
            MountRule::catch_all("/srv/collected"),
            MountRule::catch_all("/srv/project/static"),
        ]
    }

    #[test]
    fn test_catch_all_joins_path() {
        let rule = MountRule::catch_all("/srv/collected");
        assert_eq!(
            rule.candidate("css/site.css"),
            Some(PathBuf::from("/srv/collected/css/site.css"))
        );
    }

    #[test]
    fn test_stripped_rule_only_applies_under_prefix() {
        let rule = MountRule::stripped("admin/", "/srv/framework/admin");
        assert_eq!(
            rule.candidate("admin/css/base.css"),
            Some(PathBuf::from("/srv/framework/admin/css/base.css"))
        );
        assert_eq!(rule.candidate("css/base.css"), None);
        assert_eq!(rule.candidate("administrator.css"), None);
    }

    #[test]
    fn test_admin_request_orders_admin_root_first() {
        let rules = default_rules();
        let found: Vec<_> = candidates(&rules, "admin/css/base.css").collect();
        assert_eq!(
            found,
            vec![
                PathBuf::from("/srv/framework/admin/css/base.css"),
                PathBuf::from("/srv/collected/admin/css/base.css"),
                PathBuf::from("/srv/project/static/admin/css/base.css"),
            ]
        );
    }

    #[test]
    fn test_plain_request_skips_admin_root() {
        let rules = default_rules();
        let found: Vec<_> = candidates(&rules, "photos/x.png").collect();
        assert_eq!(
            found,
            vec![
                PathBuf::from("/srv/collected/photos/x.png"),
                PathBuf::from("/srv/project/static/photos/x.png"),
            ]
        );
    }

    #[test]
    fn test_prefix_without_slash_matches_whole_segment() {
        let rule = MountRule::stripped("media", "/srv/media");
        assert_eq!(
            rule.candidate("media/kit/logo.png"),
            Some(PathBuf::from("/srv/media/kit/logo.png"))
        );
        assert_eq!(rule.candidate("mediakit/logo.png"), None);

        let unstripped = MountRule {
            prefix: "media".into(),
            root: PathBuf::from("/srv/uploads"),
            strip_prefix: false,
        };
        assert_eq!(unstripped.candidate("mediakit/logo.png"), None);
        assert_eq!(
            unstripped.candidate("media/logo.png"),
            Some(PathBuf::from("/srv/uploads/media/logo.png"))
        );
    }

    #[test]
    fn test_no_rules_no_candidates() {
        assert_eq!(candidates(&[], "css/site.css").count(), 0);
    }
}

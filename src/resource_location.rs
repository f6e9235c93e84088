use std::{fmt, path::PathBuf, str::FromStr};

/// Namespace used when an identifier carries no `namespace:` prefix.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

const NAMESPACE_SEPARATOR: char = ':';
const PATH_SEPARATOR: char = '/';

/// Rejection reasons for [`ResourceLocation::parse`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceLocationError {
    #[error("invalid resource location `{0}`: more than one `:` separator")]
    TooManySeparators(String),
    #[error("invalid resource location `{0}`: namespace must not contain `/`")]
    IllegalNamespaceCharacter(String),
}

/// A namespaced identifier such as `minecraft:font/ascii`.
///
/// Parsing is the only way to build one, so every value in circulation has
/// already been validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    /// Parses `[namespace:]path`.
    ///
    /// Without a separator the whole input becomes the path and the namespace
    /// falls back to [`DEFAULT_NAMESPACE`].
    pub fn parse(s: &str) -> Result<Self, ResourceLocationError> {
        if s.matches(NAMESPACE_SEPARATOR).count() > 1 {
            return Err(ResourceLocationError::TooManySeparators(s.to_string()));
        }

        match s.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, _)) if namespace.contains(PATH_SEPARATOR) => Err(
                ResourceLocationError::IllegalNamespaceCharacter(s.to_string()),
            ),
            Some((namespace, path)) => Ok(Self {
                namespace: namespace.to_string(),
                path: path.to_string(),
            }),
            None => Ok(Self {
                namespace: DEFAULT_NAMESPACE.to_string(),
                path: s.to_string(),
            }),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Maps the location into `<category>/<namespace>/<path>`.
    ///
    /// The result is relative; callers join it onto their asset root. Path
    /// segments are copied as written, so `..` segments are not resolved and
    /// a location such as `x:../../f` maps outside `<category>/<namespace>`.
    /// Only load fonts from asset trees you trust.
    pub fn to_path(&self, category: &str) -> PathBuf {
        let mut path = PathBuf::from(category);
        path.push(&self.namespace);
        for segment in self.path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceLocation {
    type Err = ResourceLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ResourceLocation {
    type Error = ResourceLocationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace() {
        for input in ["ascii", "font/ascii", "", "a b/c"] {
            let loc = ResourceLocation::parse(input).unwrap();
            assert_eq!(loc.namespace(), DEFAULT_NAMESPACE);
            assert_eq!(loc.path(), input);
        }
    }

    #[test]
    fn test_split_at_separator() {
        let loc = ResourceLocation::parse("mymod:font/glyphs").unwrap();
        assert_eq!(loc.namespace(), "mymod");
        assert_eq!(loc.path(), "font/glyphs");

        // empty segments are allowed, only the separator count matters
        let loc = ResourceLocation::parse(":x").unwrap();
        assert_eq!(loc.namespace(), "");
        assert_eq!(loc.path(), "x");
    }

    #[test]
    fn test_two_separators_rejected() {
        assert_eq!(
            ResourceLocation::parse("a:b:c"),
            Err(ResourceLocationError::TooManySeparators("a:b:c".into()))
        );
    }

    #[test]
    fn test_slash_in_namespace_rejected() {
        assert_eq!(
            ResourceLocation::parse("a/b:c"),
            Err(ResourceLocationError::IllegalNamespaceCharacter(
                "a/b:c".into()
            ))
        );
        // a slash after the separator is just part of the path
        assert!(ResourceLocation::parse("a:b/c").is_ok());
    }

    #[test]
    fn test_to_path_is_deterministic() {
        let a = ResourceLocation::parse("minecraft:font/ascii").unwrap();
        let b = ResourceLocation::parse("font/ascii").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_path("font"), b.to_path("font"));
        assert_eq!(
            a.to_path("textures"),
            PathBuf::from("textures").join("minecraft").join("font").join("ascii")
        );
    }

    #[test]
    fn test_to_path_keeps_parent_segments() {
        let loc = ResourceLocation::parse("x:../../f").unwrap();
        assert_eq!(
            loc.to_path("font"),
            PathBuf::from("font").join("x").join("..").join("..").join("f")
        );
    }

    #[test]
    fn test_display_round_trips() {
        let loc: ResourceLocation = "ascii".parse().unwrap();
        assert_eq!(loc.to_string(), "minecraft:ascii");
        assert_eq!(ResourceLocation::parse(&loc.to_string()).unwrap(), loc);
    }
}

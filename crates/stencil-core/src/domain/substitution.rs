//! Placeholder substitution.

use crate::domain::value_objects::{Placeholder, ProjectName};

/// Replaces every literal occurrence of a [`Placeholder`] with a value.
///
/// The engine itself accepts any replacement string; callers that build a
/// substitution from user input go through [`Substitution::for_project`] so
/// the replacement is a validated [`ProjectName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    placeholder: Placeholder,
    value: String,
}

impl Substitution {
    pub fn new(placeholder: Placeholder, value: impl Into<String>) -> Self {
        Self {
            placeholder,
            value: value.into(),
        }
    }

    pub fn for_project(placeholder: Placeholder, name: &ProjectName) -> Self {
        Self::new(placeholder, name.as_str())
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Substitute the placeholder in `content`.
    pub fn apply(&self, content: &str) -> String {
        content.replace(self.placeholder.as_str(), &self.value)
    }

    /// Whether `content` contains at least one placeholder occurrence.
    pub fn matches(&self, content: &str) -> bool {
        content.contains(self.placeholder.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subst(value: &str) -> Substitution {
        Substitution::new(Placeholder::default(), value)
    }

    #[test]
    fn replaces_single_occurrence() {
        assert_eq!(subst("widgets").apply("hello __APP_NAME__"), "hello widgets");
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = subst("shop").apply("user: __APP_NAME__\npass: __APP_NAME__\ndb: __APP_NAME___test");
        assert_eq!(out, "user: shop\npass: shop\ndb: shop_test");
    }

    #[test]
    fn content_without_token_is_unchanged() {
        let content = "fn main() {\n    println!(\"APP_NAME\");\n}\n";
        assert_eq!(subst("shop").apply(content), content);
        assert!(!subst("shop").matches(content));
    }

    #[test]
    fn empty_content_is_unchanged() {
        assert_eq!(subst("shop").apply(""), "");
    }

    #[test]
    fn applying_twice_is_stable_for_ordinary_names() {
        let s = subst("shop");
        let once = s.apply("__APP_NAME__-__APP_NAME__");
        assert_eq!(s.apply(&once), once);
    }

    // A value equal to the token keeps matching after substitution, so a
    // second pass still finds work to do. ProjectName rejects '__' which
    // rules this out for real projects.
    #[test]
    fn value_equal_to_token_keeps_matching() {
        let s = subst("__APP_NAME__");
        let once = s.apply("x __APP_NAME__ y");
        assert_eq!(once, "x __APP_NAME__ y");
        assert!(s.matches(&once));
    }

    #[test]
    fn value_containing_token_is_not_idempotent() {
        let s = subst("a__APP_NAME__");
        let once = s.apply("__APP_NAME__");
        let twice = s.apply(&once);
        assert_eq!(once, "a__APP_NAME__");
        assert_eq!(twice, "aa__APP_NAME__");
        assert_ne!(once, twice);
    }

    #[test]
    fn custom_placeholder() {
        let s = Substitution::new(Placeholder::new("{{name}}").unwrap(), "shop");
        assert_eq!(s.apply("[package]\nname = \"{{name}}\""), "[package]\nname = \"shop\"");
    }

    #[test]
    fn for_project_uses_name() {
        let name = ProjectName::new("widgets").unwrap();
        let s = Substitution::for_project(Placeholder::default(), &name);
        assert_eq!(s.apply("__APP_NAME__"), "widgets");
        assert_eq!(s.placeholder().as_str(), "__APP_NAME__");
    }
}

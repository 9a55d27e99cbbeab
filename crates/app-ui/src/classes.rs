//! Conditional class-name merging
//!
//! Flattens class lists and resolves conflicts between equivalent
//! utility classes: when two classes belong to the same utility group
//! (same spacing/color/size family), the last one wins. Unrecognised
//! classes are kept verbatim and deduplicated.

/// Utility prefixes that form conflict groups
///
/// Ordered longest-first so `px-2` groups under `px`, not `p`.
const UTILITY_PREFIXES: &[&str] = &[
    "px", "py", "pt", "pr", "pb", "pl", "mx", "my", "mt", "mr", "mb", "ml", "p", "m", "w", "h",
    "min-w", "min-h", "max-w", "max-h", "bg", "text", "border", "rounded", "shadow", "opacity",
    "font", "leading", "tracking", "gap", "flex", "grid", "items", "justify", "self", "z",
    "cursor", "transition", "duration",
];

/// The conflict group of a class, if it belongs to a known utility family
fn utility_group(class: &str) -> Option<&'static str> {
    UTILITY_PREFIXES.iter().copied().find(|prefix| {
        class.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('-'))
    })
}

/// Merge class-name fragments, last-wins within a utility group
///
/// # Examples
/// ```
/// use app_ui::merge_classes;
///
/// let merged = merge_classes(["p-2 text-sm", "p-4"]);
/// assert_eq!(merged, "text-sm p-4");
/// ```
pub fn merge_classes<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ordered: Vec<(Option<&'static str>, &str)> = Vec::new();

    for fragment in fragments {
        for class in fragment.split_whitespace() {
            let group = utility_group(class);

            // Later entries displace earlier ones from the same group,
            // or exact duplicates
            ordered.retain(|(g, c)| match (g, &group) {
                (Some(a), Some(b)) => a != b,
                _ => *c != class,
            });
            ordered.push((group, class));
        }
    }

    ordered
        .into_iter()
        .map(|(_, c)| c)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builder for conditional class lists
///
/// # Examples
/// ```
/// use app_ui::ClassList;
///
/// let classes = ClassList::new()
///     .add("btn p-2")
///     .add_if("btn-loading", true)
///     .add_if("hidden", false)
///     .merge();
/// assert_eq!(classes, "btn p-2 btn-loading");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    fragments: Vec<String>,
}

impl ClassList {
    /// Create an empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class fragment unconditionally
    pub fn add(mut self, fragment: impl Into<String>) -> Self {
        self.fragments.push(fragment.into());
        self
    }

    /// Add a class fragment when the condition holds
    pub fn add_if(self, fragment: impl Into<String>, condition: bool) -> Self {
        if condition {
            self.add(fragment)
        } else {
            self
        }
    }

    /// Add an optional class fragment
    pub fn add_opt(self, fragment: Option<String>) -> Self {
        match fragment {
            Some(f) => self.add(f),
            None => self,
        }
    }

    /// Merge the collected fragments with conflict resolution
    pub fn merge(&self) -> String {
        merge_classes(self.fragments.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_wins_same_group() {
        assert_eq!(merge_classes(["p-2", "p-4"]), "p-4");
        assert_eq!(merge_classes(["bg-red-500", "bg-blue-500"]), "bg-blue-500");
    }

    #[test]
    fn test_longest_prefix_grouping() {
        // px and p are distinct groups
        assert_eq!(merge_classes(["p-2", "px-4"]), "p-2 px-4");
    }

    #[test]
    fn test_unknown_classes_deduplicated() {
        assert_eq!(merge_classes(["btn", "btn", "active"]), "btn active");
    }

    #[test]
    fn test_order_of_winner() {
        // The winning class takes the later position
        assert_eq!(merge_classes(["p-2 text-sm", "p-4"]), "text-sm p-4");
    }

    #[test]
    fn test_multiple_fragments_with_whitespace() {
        assert_eq!(merge_classes(["  p-2   m-1 ", "m-3"]), "p-2 m-3");
    }

    #[test]
    fn test_class_list_builder() {
        let classes = ClassList::new()
            .add("card p-4")
            .add_if("card-hover", true)
            .add_if("hidden", false)
            .add_opt(Some("shadow-md".to_string()))
            .add_opt(None)
            .merge();

        assert_eq!(classes, "card p-4 card-hover shadow-md");
    }

    #[test]
    fn test_empty() {
        assert_eq!(merge_classes([] as [&str; 0]), "");
        assert_eq!(ClassList::new().merge(), "");
    }
}

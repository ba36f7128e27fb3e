//! Category ordering and execution policy.

use std::collections::HashMap;

use crate::contract::{Category, CategoryProperties, ExecutionMode};

/// Pipeline execution order, identical for both flows: observability always
/// first, content always last.
pub const ORDERED_CATEGORIES: [Category; 6] = [
    Category::Observability,
    Category::Authentication,
    Category::Authorization,
    Category::RateLimiting,
    Category::Validation,
    Category::Content,
];

/// Policy row applied to any category without an explicit one: serial,
/// cannot reject, cannot modify. Unknown plugins get no power.
const CONSERVATIVE_DEFAULT: CategoryProperties = CategoryProperties {
    mode: ExecutionMode::Serial,
    can_reject: false,
    can_modify: false,
};

/// The policy table the pipeline consults for every category it visits.
#[derive(Clone, Debug)]
pub struct CategoryPolicies {
    rows: HashMap<Category, CategoryProperties>,
}

impl Default for CategoryPolicies {
    fn default() -> Self {
        let serial_reject = CategoryProperties {
            mode: ExecutionMode::Serial,
            can_reject: true,
            can_modify: false,
        };
        let rows = HashMap::from([
            (
                Category::Observability,
                CategoryProperties {
                    mode: ExecutionMode::Parallel,
                    can_reject: false,
                    can_modify: false,
                },
            ),
            (Category::Authentication, serial_reject),
            (Category::Authorization, serial_reject),
            (Category::RateLimiting, serial_reject),
            (Category::Validation, serial_reject),
            (
                Category::Content,
                CategoryProperties {
                    mode: ExecutionMode::Serial,
                    can_reject: true,
                    can_modify: true,
                },
            ),
        ]);
        CategoryPolicies { rows }
    }
}

impl CategoryPolicies {
    /// Builds a table from explicit rows. Categories without a row fall back
    /// to the conservative default.
    pub fn new(rows: HashMap<Category, CategoryProperties>) -> Self {
        CategoryPolicies { rows }
    }

    pub fn props_for(&self, category: &Category) -> CategoryProperties {
        self.rows
            .get(category)
            .copied()
            .unwrap_or(CONSERVATIVE_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observability_is_the_only_parallel_category() {
        let policies = CategoryPolicies::default();
        for category in &ORDERED_CATEGORIES {
            let props = policies.props_for(category);
            if *category == Category::Observability {
                assert_eq!(props.mode, ExecutionMode::Parallel);
            } else {
                assert_eq!(props.mode, ExecutionMode::Serial);
            }
        }
    }

    #[test]
    fn only_content_may_modify_and_observability_never_rejects() {
        let policies = CategoryPolicies::default();
        for category in &ORDERED_CATEGORIES {
            let props = policies.props_for(category);
            assert_eq!(props.can_modify, *category == Category::Content);
            assert_eq!(props.can_reject, *category != Category::Observability);
        }
    }

    #[test]
    fn unknown_categories_get_the_conservative_default() {
        let policies = CategoryPolicies::default();
        let props = policies.props_for(&Category::Custom("caching".into()));
        assert_eq!(props.mode, ExecutionMode::Serial);
        assert!(!props.can_reject);
        assert!(!props.can_modify);
    }

    #[test]
    fn execution_order_is_fixed() {
        let tags: Vec<&str> = ORDERED_CATEGORIES.iter().map(Category::as_tag).collect();
        assert_eq!(
            tags,
            [
                "observability",
                "authentication",
                "authorization",
                "rate-limiting",
                "validation",
                "content",
            ]
        );
    }
}

//! The ordered lesson collection.

use std::sync::{Arc, LazyLock};

use learn_core::CoreError;
use learn_core::lesson::{LessonRecord, LessonSummary};

use crate::curriculum;

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| {
    Arc::new(Catalog {
        lessons: curriculum::lessons(),
    })
});

/// Lessons in id order. Ids are contiguous from 1 and the catalog is never
/// empty, so `id ± 1` lookups stay meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    lessons: Vec<LessonRecord>,
}

impl Catalog {
    /// Build a catalog, checking the id invariant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Catalog` if `lessons` is empty or ids are not
    /// exactly `1..=len` in order.
    pub fn new(lessons: Vec<LessonRecord>) -> Result<Self, CoreError> {
        if lessons.is_empty() {
            return Err(CoreError::Catalog("catalog has no lessons".to_string()));
        }
        for (expected, lesson) in (1_u32..).zip(&lessons) {
            if lesson.id != expected {
                return Err(CoreError::Catalog(format!(
                    "lesson '{}' has id {}, expected {expected}",
                    lesson.title, lesson.id
                )));
            }
        }
        Ok(Self { lessons })
    }

    /// The built-in curriculum, shared across callers.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&LessonRecord> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.lessons.get(index)
    }

    /// Look up a lesson, failing with `LessonNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LessonNotFound` if `id` is outside the catalog.
    pub fn lesson(&self, id: u32) -> Result<&LessonRecord, CoreError> {
        self.get(id).ok_or(CoreError::LessonNotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn first(&self) -> &LessonRecord {
        &self.lessons[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Id of the final lesson.
    #[must_use]
    pub fn last_id(&self) -> u32 {
        self.lessons.last().map_or(1, |lesson| lesson.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LessonRecord> {
        self.lessons.iter()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<LessonSummary> {
        self.lessons.iter().map(LessonSummary::from).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a LessonRecord;
    type IntoIter = std::slice::Iter<'a, LessonRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.lessons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_satisfies_the_id_invariant() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(curriculum::lessons()).unwrap();
        assert_eq!(*builtin, rebuilt);
        assert_eq!(builtin.len(), 8);
        assert_eq!(builtin.last_id(), 8);
    }

    #[test]
    fn builtin_is_shared() {
        assert!(Arc::ptr_eq(&Catalog::builtin(), &Catalog::builtin()));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(vec![]), Err(CoreError::Catalog(_))));
    }

    #[test]
    fn rejects_gaps_and_reordering() {
        let mut lessons = curriculum::lessons();
        lessons.remove(2);
        assert!(matches!(Catalog::new(lessons), Err(CoreError::Catalog(_))));

        let mut lessons = curriculum::lessons();
        lessons.swap(0, 1);
        assert!(matches!(Catalog::new(lessons), Err(CoreError::Catalog(_))));
    }

    #[test]
    fn lookup_outside_range_is_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(9).is_none());
        assert_eq!(catalog.get(1).map(|l| l.id), Some(1));
        assert!(matches!(catalog.lesson(42), Err(CoreError::LessonNotFound(42))));
    }

    #[test]
    fn summaries_follow_catalog_order() {
        let ids: Vec<u32> = Catalog::builtin().summaries().iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}

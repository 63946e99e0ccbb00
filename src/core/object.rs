use std::collections::HashMap;

use crate::core::counter::Counter;
use crate::core::estimate::Estimate;
use crate::core::histogram::Histo1D;
use crate::core::types::ObjectKind;

/// Any analysis object this crate can read from a YODA file
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisObject {
    Histo1D(Histo1D),
    Counter(Counter),
    Estimate(Estimate),
}

impl AnalysisObject {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Histo1D(h) => &h.path,
            Self::Counter(c) => &c.path,
            Self::Estimate(e) => &e.path,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Histo1D(_) => ObjectKind::Histo1D,
            Self::Counter(_) => ObjectKind::Counter,
            Self::Estimate(_) => ObjectKind::Estimate,
        }
    }

    #[must_use]
    pub fn as_histo1d(&self) -> Option<&Histo1D> {
        match self {
            Self::Histo1D(h) => Some(h),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_counter(&self) -> Option<&Counter> {
        match self {
            Self::Counter(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_estimate(&self) -> Option<&Estimate> {
        match self {
            Self::Estimate(e) => Some(e),
            _ => None,
        }
    }
}

/// The analysis objects read from one file, in file order, indexed by path
#[derive(Debug, Default)]
pub struct AnalysisObjects {
    objects: Vec<AnalysisObject>,

    /// Index: path -> position in `objects`
    path_to_index: HashMap<String, usize>,
}

impl AnalysisObjects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object; a later object with the same path replaces the earlier one
    pub fn insert(&mut self, object: AnalysisObject) {
        if let Some(&index) = self.path_to_index.get(object.path()) {
            self.objects[index] = object;
            return;
        }
        self.path_to_index
            .insert(object.path().to_string(), self.objects.len());
        self.objects.push(object);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&AnalysisObject> {
        self.path_to_index.get(path).map(|&idx| &self.objects[idx])
    }

    #[must_use]
    pub fn histo1d(&self, path: &str) -> Option<&Histo1D> {
        self.get(path).and_then(AnalysisObject::as_histo1d)
    }

    #[must_use]
    pub fn counter(&self, path: &str) -> Option<&Counter> {
        self.get(path).and_then(AnalysisObject::as_counter)
    }

    #[must_use]
    pub fn estimate(&self, path: &str) -> Option<&Estimate> {
        self.get(path).and_then(AnalysisObject::as_estimate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisObject> {
        self.objects.iter()
    }
}

impl FromIterator<AnalysisObject> for AnalysisObjects {
    fn from_iter<I: IntoIterator<Item = AnalysisObject>>(iter: I) -> Self {
        let mut objects = Self::new();
        for object in iter {
            objects.insert(object);
        }
        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_lookup() {
        let objects: AnalysisObjects = vec![
            AnalysisObject::Counter(Counter::new("/_EVTCOUNT", 10.0, 10.0, 10.0)),
            AnalysisObject::Estimate(Estimate::new("/_XSEC", 1.0, 0.0, 0.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(objects.len(), 2);
        assert!(objects.counter("/_EVTCOUNT").is_some());
        assert!(objects.estimate("/_EVTCOUNT").is_none());
        assert!(objects.histo1d("/_XSEC").is_none());
        assert!(objects.get("/missing").is_none());
    }

    #[test]
    fn test_duplicate_path_replaces() {
        let mut objects = AnalysisObjects::new();
        objects.insert(AnalysisObject::Counter(Counter::new("/c", 1.0, 1.0, 1.0)));
        objects.insert(AnalysisObject::Counter(Counter::new("/c", 2.0, 2.0, 2.0)));

        assert_eq!(objects.len(), 1);
        assert_eq!(objects.counter("/c").map(Counter::val), Some(2.0));
    }

    #[test]
    fn test_iteration_preserves_file_order() {
        let objects: AnalysisObjects = ["/b", "/a", "/c"]
            .iter()
            .map(|p| AnalysisObject::Counter(Counter::new(*p, 0.0, 0.0, 0.0)))
            .collect();
        let paths: Vec<&str> = objects.iter().map(AnalysisObject::path).collect();
        assert_eq!(paths, vec!["/b", "/a", "/c"]);
    }
}

//! Located paths.

use std::fmt;
use std::ops::Index;
use std::slice;
use std::sync::Arc;

use super::AstItem;

/// Root-to-leaf chain of items produced by [`AstItem::find_path`].
///
/// A path is never empty. The single-item case, which is common for
/// offsets that hit no child, avoids a separate allocation. Multi-item paths
/// share their backing storage between clones and sub-paths.
#[derive(Clone)]
pub enum AstPath {
    Single(Arc<AstItem>),
    Multi {
        items: Arc<[Arc<AstItem>]>,
        len: usize,
    },
}

#[allow(clippy::len_without_is_empty)]
impl AstPath {
    /// Build a path from root-first `items`; `None` if there are none.
    pub fn create(items: Vec<Arc<AstItem>>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => items.into_iter().next().map(Self::Single),
            len => Some(Self::Multi {
                items: items.into(),
                len,
            }),
        }
    }

    /// The path consisting of `item` alone.
    pub fn from_item(item: Arc<AstItem>) -> Self {
        Self::Single(item)
    }

    /// The item the path was resolved to.
    pub fn leaf(&self) -> &Arc<AstItem> {
        match self {
            Self::Single(item) => item,
            Self::Multi { items, len } => &items[len - 1],
        }
    }

    pub fn root(&self) -> &Arc<AstItem> {
        match self {
            Self::Single(item) => item,
            Self::Multi { items, .. } => &items[0],
        }
    }

    /// Number of items, root and leaf included.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { len, .. } => *len,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Arc<AstItem>> {
        self.as_slice().get(index)
    }

    /// The prefix of this path ending at `index` (inclusive).
    ///
    /// # Panics
    /// If `index` is not a position of this path.
    #[track_caller]
    pub fn sub_path(&self, index: usize) -> AstPath {
        assert!(
            index < self.len(),
            "sub path index {index} out of range for path of length {}",
            self.len()
        );
        match self {
            Self::Multi { items, .. } if index > 0 => Self::Multi {
                items: Arc::clone(items),
                len: index + 1,
            },
            _ => Self::Single(Arc::clone(self.root())),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Arc<AstItem>> {
        self.as_slice().iter()
    }

    /// Iterate from `index` towards the leaf.
    ///
    /// # Panics
    /// If `index > len()`.
    pub fn iter_from(&self, index: usize) -> slice::Iter<'_, Arc<AstItem>> {
        self.as_slice()[index..].iter()
    }

    pub fn as_slice(&self) -> &[Arc<AstItem>] {
        match self {
            Self::Single(item) => slice::from_ref(item),
            Self::Multi { items, len } => &items[..*len],
        }
    }
}

impl Index<usize> for AstPath {
    type Output = Arc<AstItem>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a AstPath {
    type Item = &'a Arc<AstItem>;
    type IntoIter = slice::Iter<'a, Arc<AstItem>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Paths are equal when they visit the very same items.
impl PartialEq for AstPath {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl Eq for AstPath {}

impl fmt::Display for AstPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, item) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for AstPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AstPath{self}")
    }
}

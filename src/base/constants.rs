//! Tunables for tree traversal and dumps.

/// Nodes with more children than this are searched with binary search
/// over their child start offsets instead of a linear scan.
pub const LINEAR_SCAN_LIMIT: usize = 10;

/// Indentation unit used by [`AstItem::print`](crate::AstItem::print).
pub const PRINT_INDENT: &str = "  ";

/// Separator between segments of a dotted node path such as `block.statement`.
pub const PATH_SEPARATOR: char = '.';

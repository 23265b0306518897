use std::fmt;

use crate::{Compound, Options, SchemaNode, Shape, Tag, TagID, cold_path};

/// Why a tag tree failed verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyErrorKind {
    /// A non-optional compound entry is absent.
    MissingField,
    /// The tag has another type than the schema expects.
    TypeMismatch { expected: TagID, actual: TagID },
    /// A list holds elements of another type than the schema expects.
    ListKindMismatch { expected: TagID, actual: TagID },
    /// A list, array or string has the wrong number of elements or bytes.
    LengthMismatch { expected: usize, actual: usize },
    /// A string differs from the literal the schema expects.
    ValueMismatch { expected: String, actual: String },
}

/// A verification failure and where in the tree it happened.
///
/// `path` joins compound keys with `.` and list positions as `[i]`, e.g.
/// `Items[2].id`. It is empty for the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyError {
    pub path: String,
    pub kind: VerifyErrorKind,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        match &self.kind {
            VerifyErrorKind::MissingField => write!(f, "{path}: missing required field"),
            VerifyErrorKind::TypeMismatch { expected, actual } => {
                write!(f, "{path}: expected {expected}, found {actual}")
            }
            VerifyErrorKind::ListKindMismatch { expected, actual } => {
                write!(f, "{path}: expected list of {expected}, found list of {actual}")
            }
            VerifyErrorKind::LengthMismatch { expected, actual } => {
                write!(f, "{path}: expected length {expected}, found {actual}")
            }
            VerifyErrorKind::ValueMismatch { expected, actual } => {
                write!(f, "{path}: expected {expected:?}, found {actual:?}")
            }
        }
    }
}

impl std::error::Error for VerifyError {}

type VerifyResult = std::result::Result<(), VerifyError>;

/// Dotted location of the node being checked.
#[derive(Default)]
struct Path(String);

impl Path {
    fn fail(&self, kind: VerifyErrorKind) -> VerifyError {
        cold_path();
        VerifyError {
            path: self.0.clone(),
            kind,
        }
    }

    fn with_key<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let mark = self.0.len();
        if !self.0.is_empty() {
            self.0.push('.');
        }
        self.0.push_str(key);
        let result = f(self);
        self.0.truncate(mark);
        result
    }

    fn with_position<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let mark = self.0.len();
        self.0.push_str(&format!("[{index}]"));
        let result = f(self);
        self.0.truncate(mark);
        result
    }
}

impl SchemaNode {
    /// Checks `tag` against this node, stopping at the first failure.
    ///
    /// Entries a compound holds beyond those the schema names are always
    /// accepted.
    ///
    /// ```
    /// use nbt_schema::{Compound, SchemaNode, Tag, TagID, VerifyErrorKind};
    ///
    /// let schema = SchemaNode::compound("", [SchemaNode::scalar("BurnTime", TagID::Short)]);
    ///
    /// let err = schema.verify(&Tag::Compound(Compound::new())).unwrap_err();
    /// assert_eq!(err.path, "BurnTime");
    /// assert_eq!(err.kind, VerifyErrorKind::MissingField);
    /// ```
    pub fn verify(&self, tag: &Tag) -> VerifyResult {
        verify_node(self, tag, &mut Path::default())
    }

    /// Returns whether `tag` satisfies this node.
    #[inline]
    pub fn validate(&self, tag: &Tag) -> bool {
        self.verify(tag).is_ok()
    }

    /// Verifies `tag` like [`SchemaNode::verify`], but first inserts the
    /// default tree of every absent compound entry whose node carries
    /// [`Options::CREATE_ON_MISSING`].
    ///
    /// Entries inserted before a later failure stay in place.
    pub fn repair(&self, tag: &mut Tag) -> VerifyResult {
        repair_node(self, tag, &mut Path::default())
    }
}

fn check_len(path: &Path, expected: Option<usize>, actual: usize) -> VerifyResult {
    match expected {
        Some(expected) if expected != actual => {
            Err(path.fail(VerifyErrorKind::LengthMismatch { expected, actual }))
        }
        _ => Ok(()),
    }
}

/// Checks everything about `tag` except the contents of compounds and list
/// elements, which the callers walk themselves.
fn check_shape(node: &SchemaNode, tag: &Tag, path: &Path) -> VerifyResult {
    let expected = node.tag_id();
    if tag.tag_id() != expected {
        return Err(path.fail(VerifyErrorKind::TypeMismatch {
            expected,
            actual: tag.tag_id(),
        }));
    }

    match (node.shape(), tag) {
        (Shape::String { value, max_len }, Tag::String(actual)) => {
            match value {
                Some(expected) if expected != actual => {
                    return Err(path.fail(VerifyErrorKind::ValueMismatch {
                        expected: expected.clone(),
                        actual: actual.clone(),
                    }));
                }
                _ => {}
            }
            match *max_len {
                Some(max_len) if actual.len() > max_len => {
                    Err(path.fail(VerifyErrorKind::LengthMismatch {
                        expected: max_len,
                        actual: actual.len(),
                    }))
                }
                _ => Ok(()),
            }
        }
        (Shape::ByteArray { len }, Tag::ByteArray(values)) => check_len(path, *len, values.len()),
        (Shape::IntArray { len }, Tag::IntArray(values)) => check_len(path, *len, values.len()),
        (Shape::LongArray { len }, Tag::LongArray(values)) => check_len(path, *len, values.len()),
        (Shape::ShortArray { len }, Tag::ShortArray(values)) => check_len(path, *len, values.len()),
        (Shape::List { element_id, len, .. }, Tag::List(list)) => {
            // An empty list carries no elements to mismatch, and untyped empty
            // lists are read back as `Byte` lists.
            if !list.is_empty() && list.element_id() != *element_id {
                return Err(path.fail(VerifyErrorKind::ListKindMismatch {
                    expected: *element_id,
                    actual: list.element_id(),
                }));
            }
            check_len(path, *len, list.len())
        }
        _ => Ok(()),
    }
}

fn verify_node(node: &SchemaNode, tag: &Tag, path: &mut Path) -> VerifyResult {
    check_shape(node, tag, path)?;

    match (node.shape(), tag) {
        (Shape::List { element: Some(element), .. }, Tag::List(list)) => {
            for (index, item) in list.iter().enumerate() {
                path.with_position(index, |path| verify_node(element, item, path))?;
            }
            Ok(())
        }
        (Shape::Compound(children), Tag::Compound(compound)) => {
            for child in children {
                path.with_key(child.name(), |path| match compound.get(child.name()) {
                    Some(value) => verify_node(child, value, path),
                    None if child.is_optional() => Ok(()),
                    None => Err(path.fail(VerifyErrorKind::MissingField)),
                })?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn repair_node(node: &SchemaNode, tag: &mut Tag, path: &mut Path) -> VerifyResult {
    check_shape(node, tag, path)?;

    match (node.shape(), tag) {
        (Shape::List { element: Some(element), .. }, Tag::List(list)) => {
            for (index, item) in list.iter_mut().enumerate() {
                path.with_position(index, |path| repair_node(element, item, path))?;
            }
            Ok(())
        }
        (Shape::Compound(children), Tag::Compound(compound)) => {
            for child in children {
                path.with_key(child.name(), |path| repair_child(child, compound, path))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn repair_child(child: &SchemaNode, compound: &mut Compound, path: &mut Path) -> VerifyResult {
    if let Some(value) = compound.get_mut(child.name()) {
        return repair_node(child, value, path);
    }
    if child.options().contains(Options::CREATE_ON_MISSING) {
        compound.insert(child.name(), child.build_default_tree());
        return Ok(());
    }
    if child.is_optional() {
        return Ok(());
    }
    Err(path.fail(VerifyErrorKind::MissingField))
}

use crate::Tag;

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// A position usable with [`Tag::get`]: `usize` selects a list element,
/// `str`/`String` selects a compound entry. Indexing the wrong container
/// type yields `None`.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'a>(&self, tag: &'a Tag) -> Option<&'a Tag>;

    #[doc(hidden)]
    fn index_into_mut<'a>(&self, tag: &'a mut Tag) -> Option<&'a mut Tag>;
}

impl Index for usize {
    #[inline]
    fn index_into<'a>(&self, tag: &'a Tag) -> Option<&'a Tag> {
        match tag {
            Tag::List(list) => list.get(*self),
            _ => None,
        }
    }

    #[inline]
    fn index_into_mut<'a>(&self, tag: &'a mut Tag) -> Option<&'a mut Tag> {
        match tag {
            Tag::List(list) => list.get_mut(*self),
            _ => None,
        }
    }
}

impl Index for str {
    #[inline]
    fn index_into<'a>(&self, tag: &'a Tag) -> Option<&'a Tag> {
        match tag {
            Tag::Compound(compound) => compound.get(self),
            _ => None,
        }
    }

    #[inline]
    fn index_into_mut<'a>(&self, tag: &'a mut Tag) -> Option<&'a mut Tag> {
        match tag {
            Tag::Compound(compound) => compound.get_mut(self),
            _ => None,
        }
    }
}

impl Index for String {
    #[inline]
    fn index_into<'a>(&self, tag: &'a Tag) -> Option<&'a Tag> {
        self.as_str().index_into(tag)
    }

    #[inline]
    fn index_into_mut<'a>(&self, tag: &'a mut Tag) -> Option<&'a mut Tag> {
        self.as_str().index_into_mut(tag)
    }
}

impl<T: ?Sized + Index> Index for &T {
    #[inline]
    fn index_into<'a>(&self, tag: &'a Tag) -> Option<&'a Tag> {
        (**self).index_into(tag)
    }

    #[inline]
    fn index_into_mut<'a>(&self, tag: &'a mut Tag) -> Option<&'a mut Tag> {
        (**self).index_into_mut(tag)
    }
}

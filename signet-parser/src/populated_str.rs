use core::mem;

/// A string slice that is statically guaranteed to contain at least one
/// character. Used for the unconsumed tail of a short switch bundle.
#[derive(Debug)]
#[repr(transparent)]
pub struct PopulatedStr(str);

impl PopulatedStr {
    /// SAFETY: the string must not be empty
    #[inline(always)]
    pub unsafe fn new_unchecked(s: &str) -> &Self {
        debug_assert!(!s.is_empty());

        // SAFETY: PopulatedStr is repr transparent to str, so the fat
        // pointer layout is identical.
        unsafe { mem::transmute(s) }
    }

    #[inline]
    pub fn new(s: &str) -> Option<&Self> {
        match s.is_empty() {
            true => None,
            // Safety: we just confirmed that the string isn't empty
            false => Some(unsafe { Self::new_unchecked(s) }),
        }
    }

    /// The whole point: a static guarantee that there's a first character
    #[inline]
    pub fn split_first(&self) -> (char, &str) {
        let mut chars = self.0.chars();

        // Safety: `self.0` is guaranteed to be non-empty, so there is always
        // a first character
        let first = unsafe { chars.next().unwrap_unchecked() };
        (first, chars.as_str())
    }

    #[inline(always)]
    pub fn get(&self) -> &str {
        &self.0
    }
}

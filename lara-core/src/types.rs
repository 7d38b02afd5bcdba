use serde::{Deserialize, Serialize};
use std::fmt;

/// Position within a sequence (0-based).
pub type SeqPos = usize;

/// RNA alphabet with an ambiguity symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rna5 {
    A = 0,
    C = 1,
    G = 2,
    U = 3,
    N = 4,
}

impl Rna5 {
    /// Number of symbols in the alphabet.
    pub const SIZE: usize = 5;

    /// All symbols in rank order.
    pub const ALL: [Rna5; Rna5::SIZE] = [Rna5::A, Rna5::C, Rna5::G, Rna5::U, Rna5::N];

    /// Index of this symbol in score tables.
    #[inline]
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Convert an ASCII byte. DNA `T` is read as `U`; anything unknown becomes `N`.
    pub fn from_ascii(byte: u8) -> Self {
        match byte.to_ascii_uppercase() {
            b'A' => Rna5::A,
            b'C' => Rna5::C,
            b'G' => Rna5::G,
            b'U' | b'T' => Rna5::U,
            _ => Rna5::N,
        }
    }
}

impl From<u8> for Rna5 {
    fn from(byte: u8) -> Self {
        Rna5::from_ascii(byte)
    }
}

impl From<Rna5> for char {
    fn from(symbol: Rna5) -> Self {
        match symbol {
            Rna5::A => 'A',
            Rna5::C => 'C',
            Rna5::G => 'G',
            Rna5::U => 'U',
            Rna5::N => 'N',
        }
    }
}

impl fmt::Display for Rna5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Read-only random access to a run of symbols.
///
/// Implemented for owned sequences, plain slices and [`Reversed`] views, so the
/// DP engine can run over a reversed sequence without copying it.
pub trait Symbols {
    fn len(&self) -> usize;

    /// Symbol at `pos`. Panics if `pos >= self.len()`.
    fn symbol(&self, pos: SeqPos) -> Rna5;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Symbols for [Rna5] {
    #[inline]
    fn len(&self) -> usize {
        <[Rna5]>::len(self)
    }

    #[inline]
    fn symbol(&self, pos: SeqPos) -> Rna5 {
        self[pos]
    }
}

impl<S: Symbols + ?Sized> Symbols for &S {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn symbol(&self, pos: SeqPos) -> Rna5 {
        (**self).symbol(pos)
    }
}

/// Non-owning view presenting a symbol source back to front.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'a, S: ?Sized> {
    inner: &'a S,
}

impl<'a, S: Symbols + ?Sized> Reversed<'a, S> {
    pub fn new(inner: &'a S) -> Self {
        Self { inner }
    }
}

impl<S: Symbols + ?Sized> Symbols for Reversed<'_, S> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn symbol(&self, pos: SeqPos) -> Rna5 {
        self.inner.symbol(self.inner.len() - 1 - pos)
    }
}

/// A named RNA sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RnaSequence {
    pub id: String,
    symbols: Vec<Rna5>,
}

impl RnaSequence {
    pub fn new(id: impl Into<String>, symbols: Vec<Rna5>) -> Self {
        Self {
            id: id.into(),
            symbols,
        }
    }

    /// Build from raw ASCII residues.
    pub fn from_bytes(id: impl Into<String>, residues: &[u8]) -> Self {
        Self::new(id, residues.iter().copied().map(Rna5::from_ascii).collect())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[Rna5] {
        &self.symbols
    }

    pub fn reversed(&self) -> Reversed<'_, Self> {
        Reversed::new(self)
    }
}

impl Symbols for RnaSequence {
    #[inline]
    fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    fn symbol(&self, pos: SeqPos) -> Rna5 {
        self.symbols[pos]
    }
}

impl fmt::Display for RnaSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

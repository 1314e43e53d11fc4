//! Packed u32 score.
//!
//! Layout:
//! bits 24..27 : category (0..8), lower is better
//! bits 16..19 : r0
//! bits 12..15 : r1
//! bits  8..11 : r2
//! bits  4..7  : r3
//! bits  0..3  : r4
//!
//! Each r* is a 4-bit rank code (0 = Ace .. 12 = Two), taken from the five
//! ranks sorted by descending code. Comparing two scores as integers orders
//! hands: the smaller score is the stronger hand, equal scores tie.

#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HandScore(pub u32);

/// Hand categories (lower is better).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    StraightFlush = 0,
    Quads = 1,
    FullHouse = 2,
    Flush = 3,
    Straight = 4,
    Trips = 5,
    TwoPair = 6,
    OnePair = 7,
    HighCard = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::StraightFlush,
        Category::Quads,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::Trips,
        Category::TwoPair,
        Category::OnePair,
        Category::HighCard,
    ];

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Category {
        match x {
            0 => Category::StraightFlush,
            1 => Category::Quads,
            2 => Category::FullHouse,
            3 => Category::Flush,
            4 => Category::Straight,
            5 => Category::Trips,
            6 => Category::TwoPair,
            7 => Category::OnePair,
            _ => Category::HighCard,
        }
    }
}

impl HandScore {
    #[inline(always)]
    pub const fn category(self) -> Category {
        Category::from_u8(((self.0 >> 24) & 0xF) as u8)
    }

    /// The 20-bit tie-break field.
    #[inline(always)]
    pub const fn kicker(self) -> u32 {
        self.0 & 0xF_FFFF
    }

    /// True if `self` is the stronger hand.
    #[inline(always)]
    pub fn beats(self, other: HandScore) -> bool {
        self.0 < other.0
    }
}

#[inline(always)]
pub fn pack_score(cat: Category, ranks: [u8; 5]) -> HandScore {
    HandScore(
        ((cat as u32) << 24)
            | ((ranks[0] as u32) << 16)
            | ((ranks[1] as u32) << 12)
            | ((ranks[2] as u32) << 8)
            | ((ranks[3] as u32) << 4)
            | ((ranks[4] as u32) & 0xF),
    )
}

#[inline(always)]
pub fn unpack_score(s: HandScore) -> (Category, [u8; 5]) {
    let v = s.0;
    (
        s.category(),
        [
            ((v >> 16) & 0xF) as u8,
            ((v >> 12) & 0xF) as u8,
            ((v >> 8) & 0xF) as u8,
            ((v >> 4) & 0xF) as u8,
            (v & 0xF) as u8,
        ],
    )
}

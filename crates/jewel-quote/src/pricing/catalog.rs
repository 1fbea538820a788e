use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional multiplier stored in basis points so each pricing step rounds deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    pub const ZERO: Rate = Rate(0);
    pub const ONE: Rate = Rate(10_000);

    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Remaining share after taking this rate off, e.g. 25% off -> 75%.
    pub const fn complement(self) -> Self {
        if self.0 >= Self::ONE.0 {
            Self::ZERO
        } else {
            Self(Self::ONE.0 - self.0)
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::ONE.0)
    }

    /// Multiply a whole-dollar amount, rounding half up and saturating at `u32::MAX`.
    pub const fn apply(self, amount: u32) -> u32 {
        let scaled = (amount as u64 * self.0 as u64 + 5_000) / 10_000;
        if scaled > u32::MAX as u64 {
            u32::MAX
        } else {
            scaled as u32
        }
    }

    pub const fn percent(self) -> u32 {
        self.0 / 100
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{:.2}%", f64::from(self.0) / 100.0)
        }
    }
}

/// Round a non-negative amount half up to whole dollars.
pub(crate) fn round_half_up(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + 0.5).floor() as u32
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

/// Declares a catalog facet: variants, wire keys, display labels, and a price column.
macro_rules! facet {
    (
        $(#[$meta:meta])*
        $name:ident => $column:ident: $column_ty:ty {
            $( $variant:ident => ($key:literal, $label:literal, $value:expr) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub const fn $column(self) -> $column_ty {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Case-insensitive lookup accepting `-` or spaces in place of `_`.
            pub fn parse(raw: &str) -> Option<Self> {
                let key = normalize_key(raw);
                Self::ALL.iter().copied().find(|variant| variant.key() == key)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

facet! {
    /// Metal the piece is cast in.
    MetalType => price: u32 {
        YellowGold => ("yellow_gold", "Yellow Gold", 180),
        WhiteGold => ("white_gold", "White Gold", 190),
        RoseGold => ("rose_gold", "Rose Gold", 185),
        Platinum => ("platinum", "Platinum", 320),
        SterlingSilver => ("sterling_silver", "Sterling Silver", 60),
        Titanium => ("titanium", "Titanium", 70),
        GoldPlatedStainlessSteel => ("gold_plated_stainless_steel", "Gold-Plated Stainless Steel", 40),
        StainlessSteel => ("stainless_steel", "Stainless Steel", 25),
    }
}

facet! {
    /// Karat or purity refinement for a metal.
    Karat => fineness: u16 {
        K10 => ("10k", "10K Gold", 417),
        K14 => ("14k", "14K Gold", 585),
        K18 => ("18k", "18K Gold", 750),
        K24 => ("24k", "24K Gold", 999),
        Silver925 => ("925_silver", "925 Sterling Silver", 925),
        PurePlatinum => ("pure_platinum", "Pure Platinum", 950),
    }
}

facet! {
    /// Kind of piece being ordered; a design may combine several.
    JewelryType => base_price: u32 {
        Necklace => ("necklace", "Necklace", 80),
        Pendant => ("pendant", "Pendant", 60),
        Ring => ("ring", "Ring", 120),
        Earrings => ("earrings", "Earrings", 90),
        Bracelet => ("bracelet", "Bracelet", 100),
        Brooch => ("brooch", "Brooch", 110),
        Cufflinks => ("cufflinks", "Cufflinks", 95),
    }
}

facet! {
    GemstoneType => price: u32 {
        None => ("none", "No Gemstone", 0),
        Diamond => ("diamond", "Diamond", 450),
        Sapphire => ("sapphire", "Sapphire", 300),
        Ruby => ("ruby", "Ruby", 320),
        Emerald => ("emerald", "Emerald", 280),
        Amethyst => ("amethyst", "Amethyst", 90),
        Topaz => ("topaz", "Topaz", 80),
        Opal => ("opal", "Opal", 150),
        Pearl => ("pearl", "Pearl", 120),
        CubicZirconia => ("cubic_zirconia", "Cubic Zirconia", 30),
    }
}

facet! {
    GemstoneSize => multiplier: Rate {
        Small => ("small", "Small", Rate::from_basis_points(8_000)),
        Medium => ("medium", "Medium", Rate::from_basis_points(10_000)),
        Large => ("large", "Large", Rate::from_basis_points(14_000)),
        ExtraLarge => ("extra_large", "Extra Large", Rate::from_basis_points(18_000)),
    }
}

facet! {
    ChainStyle => price: u32 {
        Cable => ("cable", "Cable", 40),
        Box => ("box", "Box", 50),
        Rope => ("rope", "Rope", 70),
        Figaro => ("figaro", "Figaro", 60),
        Curb => ("curb", "Curb", 55),
        Snake => ("snake", "Snake", 65),
        Franco => ("franco", "Franco", 85),
        Wheat => ("wheat", "Wheat", 75),
    }
}

facet! {
    ChainThickness => multiplier: Rate {
        Delicate => ("delicate", "Delicate", Rate::from_basis_points(8_000)),
        Medium => ("medium", "Medium", Rate::from_basis_points(10_000)),
        Bold => ("bold", "Bold", Rate::from_basis_points(13_000)),
        Statement => ("statement", "Statement", Rate::from_basis_points(16_000)),
    }
}

facet! {
    ClosureType => price: u32 {
        LobsterClaw => ("lobster_claw", "Lobster Claw", 15),
        SpringRing => ("spring_ring", "Spring Ring", 10),
        Toggle => ("toggle", "Toggle", 25),
        Magnetic => ("magnetic", "Magnetic", 30),
        BoxClasp => ("box_clasp", "Box Clasp", 35),
    }
}

impl JewelryType {
    /// Necklaces and bracelets are strung on a chain with a closure.
    pub const fn takes_chain(self) -> bool {
        matches!(self, Self::Necklace | Self::Bracelet)
    }
}

/// Chain length, in inches, that catalog chain prices are quoted for.
pub const STANDARD_CHAIN_LENGTH_INCHES: f64 = 18.0;

/// Longest chain the studio makes; longer requests are quoted at this length.
pub const MAX_CHAIN_LENGTH_INCHES: f64 = 36.0;

/// Flat fee for working from a customer-supplied logo or sketch.
pub const CUSTOM_DESIGN_FEE: u32 = 150;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::{
    ChainStyle, ChainThickness, ClosureType, GemstoneSize, GemstoneType, JewelryType, Karat,
    MetalType,
};

const GOLD_KARATS: &[Karat] = &[Karat::K10, Karat::K14, Karat::K18, Karat::K24];
const SILVER_PURITY: &[Karat] = &[Karat::Silver925];
const PLATINUM_PURITY: &[Karat] = &[Karat::PurePlatinum];

/// Which karat/purity choices the current metal allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KaratGate {
    NoMetal,
    Applicable(&'static [Karat]),
    NotApplicable,
}

impl KaratGate {
    pub const fn for_metal(metal: Option<MetalType>) -> Self {
        match metal {
            None => Self::NoMetal,
            Some(MetalType::YellowGold | MetalType::WhiteGold | MetalType::RoseGold) => {
                Self::Applicable(GOLD_KARATS)
            }
            Some(MetalType::SterlingSilver) => Self::Applicable(SILVER_PURITY),
            Some(MetalType::Platinum) => Self::Applicable(PLATINUM_PURITY),
            Some(
                MetalType::Titanium
                | MetalType::GoldPlatedStainlessSteel
                | MetalType::StainlessSteel,
            ) => Self::NotApplicable,
        }
    }

    pub fn options(self) -> &'static [Karat] {
        match self {
            Self::Applicable(options) => options,
            Self::NoMetal | Self::NotApplicable => &[],
        }
    }

    pub fn allows(self, karat: Karat) -> bool {
        self.options().contains(&karat)
    }
}

/// Rejected edits to a design configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignError {
    #[error("{karat} is not offered for {}", metal_label(.metal))]
    KaratNotAllowed {
        karat: Karat,
        metal: Option<MetalType>,
    },
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

fn metal_label(metal: &Option<MetalType>) -> &'static str {
    metal.map(MetalType::label).unwrap_or("an unselected metal")
}

fn default_quantity() -> u32 {
    1
}

/// In-progress custom design; every facet is optional until submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConfiguration {
    #[serde(default)]
    pub jewelry_types: BTreeSet<JewelryType>,
    #[serde(default)]
    pub metal_type: Option<MetalType>,
    #[serde(default)]
    pub metal_karat: Option<Karat>,
    #[serde(default)]
    pub gemstone_type: Option<GemstoneType>,
    #[serde(default)]
    pub gemstone_size: Option<GemstoneSize>,
    #[serde(default)]
    pub chain_style: Option<ChainStyle>,
    #[serde(default)]
    pub chain_thickness: Option<ChainThickness>,
    #[serde(default)]
    pub chain_length: Option<f64>,
    #[serde(default)]
    pub closure_type: Option<ClosureType>,
    #[serde(default)]
    pub logo_image_url: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl Default for DesignConfiguration {
    fn default() -> Self {
        Self {
            jewelry_types: BTreeSet::new(),
            metal_type: None,
            metal_karat: None,
            gemstone_type: None,
            gemstone_size: None,
            chain_style: None,
            chain_thickness: None,
            chain_length: None,
            closure_type: None,
            logo_image_url: None,
            quantity: default_quantity(),
        }
    }
}

impl DesignConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn karat_gate(&self) -> KaratGate {
        KaratGate::for_metal(self.metal_type)
    }

    /// Switch metal, dropping a karat the new metal cannot carry.
    pub fn select_metal(&mut self, metal: MetalType) {
        self.metal_type = Some(metal);
        if let Some(karat) = self.metal_karat {
            if !self.karat_gate().allows(karat) {
                self.metal_karat = None;
            }
        }
    }

    pub fn clear_metal(&mut self) {
        self.metal_type = None;
        self.metal_karat = None;
    }

    pub fn select_karat(&mut self, karat: Karat) -> Result<(), DesignError> {
        if !self.karat_gate().allows(karat) {
            return Err(DesignError::KaratNotAllowed {
                karat,
                metal: self.metal_type,
            });
        }
        self.metal_karat = Some(karat);
        Ok(())
    }

    pub fn clear_karat(&mut self) {
        self.metal_karat = None;
    }

    /// Add the type when absent, remove it when present. Returns whether it is now selected.
    pub fn toggle_jewelry_type(&mut self, jewelry_type: JewelryType) -> bool {
        if self.jewelry_types.remove(&jewelry_type) {
            false
        } else {
            self.jewelry_types.insert(jewelry_type);
            true
        }
    }

    pub fn with_jewelry_type(mut self, jewelry_type: JewelryType) -> Self {
        self.jewelry_types.insert(jewelry_type);
        self
    }

    pub fn has_type(&self, jewelry_type: JewelryType) -> bool {
        self.jewelry_types.contains(&jewelry_type)
    }

    pub fn select_gemstone(&mut self, gemstone: GemstoneType) {
        self.gemstone_type = Some(gemstone);
        if gemstone == GemstoneType::None {
            self.gemstone_size = None;
        }
    }

    pub fn select_gemstone_size(&mut self, size: GemstoneSize) {
        self.gemstone_size = Some(size);
    }

    pub fn select_chain_style(&mut self, style: ChainStyle) {
        self.chain_style = Some(style);
    }

    pub fn select_chain_thickness(&mut self, thickness: ChainThickness) {
        self.chain_thickness = Some(thickness);
    }

    pub fn set_chain_length(&mut self, inches: f64) {
        self.chain_length = Some(inches);
    }

    pub fn select_closure(&mut self, closure: ClosureType) {
        self.closure_type = Some(closure);
    }

    pub fn attach_logo(&mut self, url: impl Into<String>) {
        self.logo_image_url = Some(url.into());
    }

    pub fn remove_logo(&mut self) {
        self.logo_image_url = None;
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), DesignError> {
        if quantity == 0 {
            return Err(DesignError::ZeroQuantity);
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Chain, thickness, length, and closure only matter for necklaces and bracelets.
    pub fn needs_chain(&self) -> bool {
        self.jewelry_types.iter().any(|kind| kind.takes_chain())
    }

    pub fn has_logo(&self) -> bool {
        self.logo_image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Wire form of a design using raw catalog keys.
///
/// Conversion is lenient: unknown keys become "not selected" rather than errors,
/// since a quote is always a best-effort estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignKeys {
    #[serde(default)]
    pub jewelry_types: Vec<String>,
    #[serde(default)]
    pub metal_type: Option<String>,
    #[serde(default)]
    pub metal_karat: Option<String>,
    #[serde(default)]
    pub gemstone_type: Option<String>,
    #[serde(default)]
    pub gemstone_size: Option<String>,
    #[serde(default)]
    pub chain_style: Option<String>,
    #[serde(default)]
    pub chain_thickness: Option<String>,
    #[serde(default)]
    pub chain_length: Option<f64>,
    #[serde(default)]
    pub closure_type: Option<String>,
    #[serde(default)]
    pub logo_image_url: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

fn lookup<T>(facet: &'static str, raw: Option<&str>, parse: fn(&str) -> Option<T>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse(raw);
    if parsed.is_none() {
        warn!(facet, key = raw, "unknown catalog key ignored");
    }
    parsed
}

impl DesignKeys {
    pub fn into_design(self) -> DesignConfiguration {
        let mut design = DesignConfiguration::new();

        for raw in &self.jewelry_types {
            if let Some(kind) = lookup("jewelry_type", Some(raw.as_str()), JewelryType::parse) {
                design.jewelry_types.insert(kind);
            }
        }

        if let Some(metal) = lookup("metal_type", self.metal_type.as_deref(), MetalType::parse) {
            design.select_metal(metal);
        }
        if let Some(karat) = lookup("metal_karat", self.metal_karat.as_deref(), Karat::parse) {
            if let Err(err) = design.select_karat(karat) {
                warn!(%err, "karat dropped from design");
            }
        }
        if let Some(gemstone) = lookup(
            "gemstone_type",
            self.gemstone_type.as_deref(),
            GemstoneType::parse,
        ) {
            design.select_gemstone(gemstone);
        }
        if design.gemstone_type.is_some_and(|gem| gem != GemstoneType::None) {
            design.gemstone_size = lookup(
                "gemstone_size",
                self.gemstone_size.as_deref(),
                GemstoneSize::parse,
            );
        }

        design.chain_style = lookup("chain_style", self.chain_style.as_deref(), ChainStyle::parse);
        design.chain_thickness = lookup(
            "chain_thickness",
            self.chain_thickness.as_deref(),
            ChainThickness::parse,
        );
        design.chain_length = self.chain_length;
        design.closure_type = lookup(
            "closure_type",
            self.closure_type.as_deref(),
            ClosureType::parse,
        );
        design.logo_image_url = self.logo_image_url.filter(|url| !url.trim().is_empty());
        // Zero is kept so submission validation can report it.
        design.quantity = self.quantity.unwrap_or(1);

        design
    }
}

impl From<&DesignConfiguration> for DesignKeys {
    fn from(design: &DesignConfiguration) -> Self {
        Self {
            jewelry_types: design
                .jewelry_types
                .iter()
                .map(|kind| kind.key().to_string())
                .collect(),
            metal_type: design.metal_type.map(|value| value.key().to_string()),
            metal_karat: design.metal_karat.map(|value| value.key().to_string()),
            gemstone_type: design.gemstone_type.map(|value| value.key().to_string()),
            gemstone_size: design.gemstone_size.map(|value| value.key().to_string()),
            chain_style: design.chain_style.map(|value| value.key().to_string()),
            chain_thickness: design.chain_thickness.map(|value| value.key().to_string()),
            chain_length: design.chain_length,
            closure_type: design.closure_type.map(|value| value.key().to_string()),
            logo_image_url: design.logo_image_url.clone(),
            quantity: Some(design.quantity),
        }
    }
}

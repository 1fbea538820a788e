use crate::pricing::{
    DesignConfiguration, GemstoneSize, GemstoneType, JewelryType, LineItemKind, MetalType,
    PriceQuote, PricedLineItem,
};

pub(super) fn design(metal: MetalType, types: &[JewelryType]) -> DesignConfiguration {
    let mut design = DesignConfiguration::new();
    design.select_metal(metal);
    for &kind in types {
        design.jewelry_types.insert(kind);
    }
    design
}

pub(super) fn steel_necklace_and_pendant() -> DesignConfiguration {
    let mut design = design(
        MetalType::StainlessSteel,
        &[JewelryType::Necklace, JewelryType::Pendant],
    );
    design.select_gemstone(GemstoneType::None);
    design
}

pub(super) fn gold_diamond_ring(quantity: u32) -> DesignConfiguration {
    let mut design = design(MetalType::YellowGold, &[JewelryType::Ring]);
    design.select_gemstone(GemstoneType::Diamond);
    design.select_gemstone_size(GemstoneSize::Large);
    design.set_quantity(quantity).expect("positive quantity");
    design
}

pub(super) fn steel_metals() -> [MetalType; 2] {
    [MetalType::StainlessSteel, MetalType::GoldPlatedStainlessSteel]
}

pub(super) fn line(quote: &PriceQuote, kind: LineItemKind) -> Vec<&PricedLineItem> {
    quote
        .breakdown
        .iter()
        .filter(|item| item.kind == kind)
        .collect()
}

pub(super) fn type_line<'a>(quote: &'a PriceQuote, label_prefix: &str) -> &'a PricedLineItem {
    quote
        .breakdown
        .iter()
        .find(|item| item.kind == LineItemKind::JewelryType && item.label.starts_with(label_prefix))
        .unwrap_or_else(|| panic!("missing line item for {label_prefix}"))
}

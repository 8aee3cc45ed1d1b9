//! Tests for text normalization
//!
//! Identifier cleaning and defect detection are tested separately; shared
//! samples live here.


/// Realistic clean product titles that should trigger no defects
pub fn clean_titles() -> Vec<&'static str> {
    vec![
        "Nike Air Zoom Pegasus 40 Running Shoes - Black",
        "Organic Cotton T-Shirt, Navy, Size M",
        "Stainless Steel Water Bottle (750 ml)",
        "Ceramic Coffee Mug; Dishwasher Safe",
        "Café Crème Espresso Beans 1 kg",
    ]
}

//! Spending category taxonomy
//!
//! Closed two-level enumeration of spending categories. Every [`SubCategory`]
//! carries a stable key, a display label, and exactly one parent [`Category`].
//! The keyword tables driving classification live in [`keywords`].

pub mod keywords;

use serde::{Deserialize, Serialize};

/// Top-level spending category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Clothing,
    Medical,
    Housing,
    HouseholdGoods,
    Transport,
    Education,
    Entertainment,
    Finance,
    /// Invoice lottery winnings.
    Winning,
    #[default]
    Other,
}

impl Category {
    /// Stable machine key.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Clothing => "clothing",
            Category::Medical => "medical",
            Category::Housing => "housing",
            Category::HouseholdGoods => "household_goods",
            Category::Transport => "transport",
            Category::Education => "education",
            Category::Entertainment => "entertainment",
            Category::Finance => "finance",
            Category::Winning => "winning",
            Category::Other => "other",
        }
    }

    /// Display label (Traditional Chinese, as printed on the ledger).
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "飲食",
            Category::Clothing => "衣物",
            Category::Medical => "醫藥/衛生",
            Category::Housing => "住(租金/房貸)",
            Category::HouseholdGoods => "生活物品",
            Category::Transport => "行(交通費/油錢)",
            Category::Education => "教育(學費)",
            Category::Entertainment => "娛樂(場地門票)",
            Category::Finance => "理財",
            Category::Winning => "發票中獎",
            Category::Other => "其它",
        }
    }
}

/// Second-level spending category. Many-to-one onto [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubCategory {
    // 飲食
    Vegetable,
    Drink,
    Restaurant,
    Snack,
    // 交通
    Parking,
    Gasoline,
    EasyCard,
    Etag,
    Taxi,
    Hsr,
    Tra,
    // 住
    WaterElectric,
    GasFee,
    Internet,
    Phone,
    Mortgage,
    Management,
    // 生活
    Sundries,
    Tissue,
    Appliance,
    Maintenance,
    // 娛樂
    Movie,
    Ticket,
    // 理財
    Fund,
    Stock,
    Gold,
    Exchange,
    Tax,
    Fine,
    Insurance,
    // 其他
    DeliveryFamily,
    #[serde(rename = "delivery_711")]
    Delivery711,
    DeliveryOk,
    DeliveryHilife,
}

/// (subcategory, key, label, parent) rows in declaration order.
const SUBCATEGORY_TABLE: &[(SubCategory, &str, &str, Category)] = &[
    (SubCategory::Vegetable, "vegetable", "菜錢", Category::Food),
    (SubCategory::Drink, "drink", "飲料", Category::Food),
    (SubCategory::Restaurant, "restaurant", "餐廳", Category::Food),
    (SubCategory::Snack, "snack", "零食", Category::Food),
    (SubCategory::Parking, "parking", "停車費", Category::Transport),
    (SubCategory::Gasoline, "gasoline", "油錢", Category::Transport),
    (SubCategory::EasyCard, "easy_card", "悠遊卡", Category::Transport),
    (SubCategory::Etag, "etag", "eTag", Category::Transport),
    (SubCategory::Taxi, "taxi", "計程車", Category::Transport),
    (SubCategory::Hsr, "hsr", "高鐵票", Category::Transport),
    (SubCategory::Tra, "tra", "台鐵票", Category::Transport),
    (SubCategory::WaterElectric, "water_electric", "水電", Category::Housing),
    (SubCategory::GasFee, "gas_fee", "瓦斯", Category::Housing),
    (SubCategory::Internet, "internet", "電視網路", Category::Housing),
    (SubCategory::Phone, "phone", "手機/電話", Category::Housing),
    (SubCategory::Mortgage, "mortgage", "房貸", Category::Housing),
    (SubCategory::Management, "management", "管理費", Category::Housing),
    (SubCategory::Sundries, "sundries", "雜貨", Category::HouseholdGoods),
    (SubCategory::Tissue, "tissue", "衛生紙", Category::HouseholdGoods),
    (SubCategory::Appliance, "appliance", "電器品", Category::HouseholdGoods),
    (SubCategory::Maintenance, "maintenance", "維修保養", Category::HouseholdGoods),
    (SubCategory::Movie, "movie", "電影票", Category::Entertainment),
    (SubCategory::Ticket, "ticket", "設施入場券", Category::Entertainment),
    (SubCategory::Fund, "fund", "基金", Category::Finance),
    (SubCategory::Stock, "stock", "股票", Category::Finance),
    (SubCategory::Gold, "gold", "黃金", Category::Finance),
    (SubCategory::Exchange, "exchange", "換匯", Category::Finance),
    (SubCategory::Tax, "tax", "稅金", Category::Finance),
    (SubCategory::Fine, "fine", "罰款", Category::Finance),
    (SubCategory::Insurance, "insurance", "保險", Category::Finance),
    (SubCategory::DeliveryFamily, "delivery_family", "網購取件-全家", Category::Other),
    (SubCategory::Delivery711, "delivery_711", "網購取件-7-11", Category::Other),
    (SubCategory::DeliveryOk, "delivery_ok", "網購取件-OK", Category::Other),
    (SubCategory::DeliveryHilife, "delivery_hilife", "網購取件-萊爾富", Category::Other),
];

impl SubCategory {
    fn row(&self) -> &'static (SubCategory, &'static str, &'static str, Category) {
        let row = SUBCATEGORY_TABLE.iter().find(|(sub, ..)| sub == self);
        debug_assert!(row.is_some(), "{self:?} has no table row");
        row.unwrap_or(&SUBCATEGORY_TABLE[0])
    }

    /// Stable machine key.
    pub fn key(&self) -> &'static str {
        self.row().1
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        self.row().2
    }

    /// Owning top-level category.
    pub fn parent(&self) -> Category {
        self.row().3
    }

    /// Look up a subcategory by its stable key.
    pub fn from_key(key: &str) -> Option<SubCategory> {
        SUBCATEGORY_TABLE
            .iter()
            .find(|(_, k, ..)| *k == key)
            .map(|(sub, ..)| *sub)
    }

    /// All subcategories owned by `parent`, in declaration order.
    pub fn variants_for(parent: Category) -> impl Iterator<Item = SubCategory> {
        SUBCATEGORY_TABLE
            .iter()
            .filter(move |(.., p)| *p == parent)
            .map(|(sub, ..)| *sub)
    }

    /// All (key, label) choices, in declaration order.
    pub fn choices() -> impl Iterator<Item = (&'static str, &'static str)> {
        SUBCATEGORY_TABLE.iter().map(|(_, key, label, _)| (*key, *label))
    }
}

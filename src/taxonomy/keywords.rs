//! Keyword trigger tables for rule-based classification
//!
//! Both tables are scanned in declaration order and the first trigger found
//! as a substring of the item name wins. Order is part of the behavioral
//! contract: an item name containing several valid triggers always resolves
//! to the earliest table entry, never the longest or "best" match.

use super::{Category, SubCategory};

/// Subcategory triggers, checked before the coarser category table. A hit
/// here also decides the category via the subcategory's parent link.
pub static SUBCATEGORY_KEYWORDS: &[(SubCategory, &[&str])] = &[
    (SubCategory::Vegetable, &["菜", "蔬果", "水果"]),
    (SubCategory::Drink, &["飲料", "可樂", "紅茶", "綠茶", "奶茶", "咖啡", "汽水"]),
    (SubCategory::Restaurant, &["餐廳", "便當", "定食", "套餐"]),
    (SubCategory::Snack, &["零食", "餅乾", "洋芋片", "蛋黃派", "巧克力", "糖果"]),
    (SubCategory::Parking, &["停車", "車位"]),
    (SubCategory::Gasoline, &["汽油", "無鉛", "柴油", "加油"]),
    (SubCategory::EasyCard, &["悠遊卡", "悠遊加值"]),
    (SubCategory::Etag, &["eTag", "ETC", "通行費"]),
    (SubCategory::Taxi, &["計程車", "車資"]),
    (SubCategory::Hsr, &["高鐵"]),
    (SubCategory::Tra, &["台鐵", "臺鐵"]),
    (SubCategory::WaterElectric, &["水費", "電費", "台電", "自來水"]),
    (SubCategory::GasFee, &["瓦斯", "天然氣"]),
    (SubCategory::Internet, &["網路費", "第四台", "有線電視"]),
    (SubCategory::Phone, &["電話費", "手機費", "通信費"]),
    (SubCategory::Mortgage, &["房貸"]),
    (SubCategory::Management, &["管理費"]),
    (SubCategory::Sundries, &["雜貨", "日用品"]),
    (SubCategory::Tissue, &["衛生紙", "面紙"]),
    (SubCategory::Appliance, &["電器", "家電"]),
    (SubCategory::Maintenance, &["維修", "保養"]),
    (SubCategory::Movie, &["電影"]),
    (SubCategory::Ticket, &["門票", "入場券"]),
    (SubCategory::Fund, &["基金"]),
    (SubCategory::Stock, &["股票", "證券"]),
    (SubCategory::Gold, &["黃金"]),
    (SubCategory::Exchange, &["換匯", "外幣"]),
    (SubCategory::Tax, &["稅金", "牌照稅", "所得稅"]),
    (SubCategory::Fine, &["罰款", "罰單"]),
    (SubCategory::Insurance, &["保險", "保費"]),
    (SubCategory::DeliveryFamily, &["全家取件"]),
    (SubCategory::Delivery711, &["7-11取件"]),
    (SubCategory::DeliveryOk, &["OK取件"]),
    (SubCategory::DeliveryHilife, &["萊爾富取件"]),
];

/// Coarse category triggers, consulted only when no subcategory matched.
/// `Other` carries no triggers; it is the fall-through default.
pub static CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Food, &["餐", "食", "麵", "飯", "肉", "蛋", "奶", "茶"]),
    (Category::Clothing, &["衣", "服", "褲", "襪", "鞋"]),
    (Category::Medical, &["藥", "診所", "醫院", "口罩"]),
    (Category::Housing, &["房租", "租金"]),
    (Category::HouseholdGoods, &["清潔", "洗衣精", "牙膏", "沐浴"]),
    (Category::Transport, &["車", "油", "交通"]),
    (Category::Education, &["學費", "補習", "文具", "書"]),
    (Category::Entertainment, &["遊戲", "KTV", "唱片", "票"]),
    (Category::Finance, &["手續費", "利息"]),
    (Category::Winning, &["中獎"]),
];

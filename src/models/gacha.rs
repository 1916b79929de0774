use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    N,
    R,
    SR,
    SSR,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::N => "N",
            Rarity::R => "R",
            Rarity::SR => "SR",
            Rarity::SSR => "SSR",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaItem {
    pub name: String,
    pub rarity: Rarity,
    pub flavor: String,
}

impl GachaItem {
    pub fn new(name: &str, rarity: Rarity, flavor: &str) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            flavor: flavor.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaPull {
    pub item: GachaItem,
    pub drawn_at: DateTime<Utc>,
}

pub fn default_items() -> Vec<GachaItem> {
    vec![
        GachaItem::new("缶コーヒー", Rarity::N, "面接前の一杯。眠気が少し飛ぶ。"),
        GachaItem::new("のど飴", Rarity::N, "グループディスカッションで声が通る。"),
        GachaItem::new("新品のボールペン", Rarity::N, "ESの字が少しだけ綺麗になる。"),
        GachaItem::new("折りたたみ傘", Rarity::R, "雨の日の説明会でもスーツが濡れない。"),
        GachaItem::new("業界地図", Rarity::R, "志望動機に深みが出る。"),
        GachaItem::new("OBの名刺", Rarity::SR, "次の訪問先を紹介してもらえるかもしれない。"),
        GachaItem::new("模擬面接チケット", Rarity::SR, "本番の緊張が半分になる。"),
        GachaItem::new("内定の予感", Rarity::SSR, "今日は何をやってもうまくいく気がする。"),
    ]
}

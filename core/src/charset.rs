use serde::{Deserialize, Serialize};

use crate::Points;

/// Everyday characters, worth the least when guessed.
pub const COMMON_CHARS: &[char] = &[
    '的', '了', '在', '是', '有', '我', '他', '她', '它', '这', '那', '一', '不', '人', '上', '下',
    '大', '小', '中', '来', '去', '说', '要', '会', '能', '可', '就', '都', '也', '还', '又', '和',
    '与', '或', '但', '而', '因', '为', '所', '以', '从', '到', '把', '被', '让', '使', '给', '对',
    '向', '往', '于', '里', '外', '前', '后', '左', '右', '东', '西', '南', '北', '年', '月', '日',
    '时', '分', '秒', '今', '明', '昨', '早', '晚', '白', '黑', '红', '绿', '蓝', '黄', '紫', '好',
    '坏', '新', '旧', '多', '少', '高', '低', '长', '短', '快', '慢', '热', '冷', '干', '湿', '美',
    '丑', '爱', '恨', '喜', '怒', '哀', '乐',
];

/// Characters of the bundled corpus that are hard to come up with.
pub const RARE_CHARS: &[char] = &[
    '霜', '鹳', '蓑', '撷', '琼', '楼', '宇', '绮', '户', '婵', '娟', '樯', '橹', '酹', '纶', '巾',
    '凄', '戚', '憔', '悴', '梧', '桐', '滴', '寻', '觅', '惨', '将', '息', '敌', '雁', '识', '堆',
    '积', '损', '摘', '怎', '生', '兼', '黄', '昏', '次', '第', '愁',
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClass {
    Common,
    Regular,
    Rare,
}

impl CharClass {
    /// Classifies a guessed character. Common wins over rare for the few
    /// characters listed in both tables.
    pub fn of(ch: char) -> Self {
        if COMMON_CHARS.contains(&ch) {
            Self::Common
        } else if RARE_CHARS.contains(&ch) {
            Self::Rare
        } else {
            Self::Regular
        }
    }

    pub const fn points(self) -> Points {
        match self {
            Self::Common => 20,
            Self::Regular => 30,
            Self::Rare => 50,
        }
    }
}

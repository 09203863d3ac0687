// 属性计算系统
// 开发心理：六项派生属性由(等级, 遗传档案)确定性推出，两次调用结果必须完全一致
// 共享基础值 20 + floor(level × 2.5) 代替逐物种基础属性表
// 性格表：每个非中性性格恰好+10%一项、-10%另一项，HP不受性格影响

use serde::{Deserialize, Serialize};

use crate::utils::random::RandomGenerator;

/// 等级上限
pub const MAX_LEVEL: u32 = 100;
/// 单项个体值上限
pub const IV_MAX: u16 = 31;
/// 单项努力值上限
pub const EV_CAP: u16 = 255;

// 六项属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl StatType {
    pub const ALL: [StatType; 6] = [
        StatType::Hp,
        StatType::Attack,
        StatType::Defense,
        StatType::SpAttack,
        StatType::SpDefense,
        StatType::Speed,
    ];

    /// 受性格影响的五项
    pub const NON_HP: [StatType; 5] = [
        StatType::Attack,
        StatType::Defense,
        StatType::SpAttack,
        StatType::SpDefense,
        StatType::Speed,
    ];
}

/// 一组六项数值，个体值/努力值/派生属性共用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl StatBlock {
    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Hp => self.hp,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpAttack => self.sp_attack,
            StatType::SpDefense => self.sp_defense,
            StatType::Speed => self.speed,
        }
    }

    pub fn get_mut(&mut self, stat: StatType) -> &mut u16 {
        match stat {
            StatType::Hp => &mut self.hp,
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::SpAttack => &mut self.sp_attack,
            StatType::SpDefense => &mut self.sp_defense,
            StatType::Speed => &mut self.speed,
        }
    }

    pub fn total(&self) -> u32 {
        StatType::ALL
            .iter()
            .map(|stat| self.get(*stat) as u32)
            .sum()
    }

    /// 随机个体值：每项独立取 [0, 31]
    pub fn random_ivs(rng: &mut RandomGenerator) -> Self {
        let mut ivs = StatBlock::default();
        for stat in StatType::ALL {
            *ivs.get_mut(stat) = rng.range_inclusive(0, IV_MAX as i32) as u16;
        }
        ivs
    }
}

// 性格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    // 中性
    Hardy,
    Docile,
    Serious,
    Bashful,
    Quirky,

    // +攻击
    Lonely,   // -防御
    Brave,    // -速度
    Adamant,  // -特攻
    Naughty,  // -特防

    // +防御
    Bold,    // -攻击
    Relaxed, // -速度
    Impish,  // -特攻
    Lax,     // -特防

    // +特攻
    Modest, // -攻击
    Mild,   // -防御
    Quiet,  // -速度
    Rash,   // -特防

    // +特防
    Calm,    // -攻击
    Gentle,  // -防御
    Sassy,   // -速度
    Careful, // -特攻

    // +速度
    Timid, // -攻击
    Hasty, // -防御
    Jolly, // -特攻
    Naive, // -特防
}

impl Nature {
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    pub fn random(rng: &mut RandomGenerator) -> Nature {
        *rng.choose(&Nature::ALL).unwrap_or(&Nature::Hardy)
    }

    /// 被强化的属性，中性性格为None
    pub fn boosted(&self) -> Option<StatType> {
        match self {
            Nature::Lonely | Nature::Brave | Nature::Adamant | Nature::Naughty => {
                Some(StatType::Attack)
            }
            Nature::Bold | Nature::Relaxed | Nature::Impish | Nature::Lax => {
                Some(StatType::Defense)
            }
            Nature::Modest | Nature::Mild | Nature::Quiet | Nature::Rash => {
                Some(StatType::SpAttack)
            }
            Nature::Calm | Nature::Gentle | Nature::Sassy | Nature::Careful => {
                Some(StatType::SpDefense)
            }
            Nature::Timid | Nature::Hasty | Nature::Jolly | Nature::Naive => {
                Some(StatType::Speed)
            }
            _ => None,
        }
    }

    /// 被削弱的属性，中性性格为None
    pub fn hindered(&self) -> Option<StatType> {
        match self {
            Nature::Bold | Nature::Modest | Nature::Calm | Nature::Timid => {
                Some(StatType::Attack)
            }
            Nature::Lonely | Nature::Mild | Nature::Gentle | Nature::Hasty => {
                Some(StatType::Defense)
            }
            Nature::Adamant | Nature::Impish | Nature::Careful | Nature::Jolly => {
                Some(StatType::SpAttack)
            }
            Nature::Naughty | Nature::Lax | Nature::Rash | Nature::Naive => {
                Some(StatType::SpDefense)
            }
            Nature::Brave | Nature::Relaxed | Nature::Quiet | Nature::Sassy => {
                Some(StatType::Speed)
            }
            _ => None,
        }
    }

    pub fn multiplier(&self, stat: StatType) -> f64 {
        if self.boosted() == Some(stat) {
            1.1
        } else if self.hindered() == Some(stat) {
            0.9
        } else {
            1.0
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Nature::Hardy => "Hardy",
            Nature::Lonely => "Lonely",
            Nature::Brave => "Brave",
            Nature::Adamant => "Adamant",
            Nature::Naughty => "Naughty",
            Nature::Bold => "Bold",
            Nature::Docile => "Docile",
            Nature::Relaxed => "Relaxed",
            Nature::Impish => "Impish",
            Nature::Lax => "Lax",
            Nature::Timid => "Timid",
            Nature::Hasty => "Hasty",
            Nature::Serious => "Serious",
            Nature::Jolly => "Jolly",
            Nature::Naive => "Naive",
            Nature::Modest => "Modest",
            Nature::Mild => "Mild",
            Nature::Quiet => "Quiet",
            Nature::Bashful => "Bashful",
            Nature::Rash => "Rash",
            Nature::Calm => "Calm",
            Nature::Gentle => "Gentle",
            Nature::Sassy => "Sassy",
            Nature::Careful => "Careful",
            Nature::Quirky => "Quirky",
        }
    }

    pub fn from_name(name: &str) -> Option<Nature> {
        Nature::ALL.iter().copied().find(|nature| nature.name() == name)
    }
}

impl std::fmt::Display for Nature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 遗传档案：个体值、努力值与性格
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneticProfile {
    pub ivs: StatBlock,
    pub evs: StatBlock,
    /// 未设置视为全中性
    pub nature: Option<Nature>,
}

/// 派生属性计算，纯函数
///
/// HP:   floor((2·base + iv + floor(ev/4)) · level/100) + level + 10
/// 其余: floor(((2·base + iv + floor(ev/4)) · level/100 + 5) × 性格系数)
pub fn compute_stats(level: u32, profile: &GeneticProfile) -> StatBlock {
    let level = level.clamp(1, MAX_LEVEL);
    let base = 20 + level * 5 / 2;

    let mut stats = StatBlock::default();

    let hp_term = 2 * base + profile.ivs.hp as u32 + (profile.evs.hp / 4) as u32;
    stats.hp = (hp_term * level / 100 + level + 10) as u16;

    for stat in StatType::NON_HP {
        let iv = profile.ivs.get(stat) as u32;
        let ev = (profile.evs.get(stat) / 4) as u32;
        let term = 2 * base + iv + ev;

        let multiplier = profile
            .nature
            .map(|nature| nature.multiplier(stat))
            .unwrap_or(1.0);
        let raw = ((term * level) as f64 / 100.0 + 5.0) * multiplier;
        *stats.get_mut(stat) = raw.floor() as u16;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(iv: u16, ev: u16, nature: Option<Nature>) -> GeneticProfile {
        let fill = |value: u16| StatBlock {
            hp: value,
            attack: value,
            defense: value,
            sp_attack: value,
            sp_defense: value,
            speed: value,
        };
        GeneticProfile {
            ivs: fill(iv),
            evs: fill(ev),
            nature,
        }
    }

    #[test]
    fn test_deterministic() {
        let p = profile(31, 0, Some(Nature::Adamant));
        assert_eq!(compute_stats(50, &p), compute_stats(50, &p));
    }

    #[test]
    fn test_known_values_level_50() {
        // base = 20 + 125 = 145, 项 = 2·145 + 31 = 321
        let p = profile(31, 0, Some(Nature::Adamant));
        let stats = compute_stats(50, &p);

        assert_eq!(stats.hp, 220); // 321·50/100 + 50 + 10
        assert_eq!(stats.attack, 182); // floor(165.5 × 1.1)
        assert_eq!(stats.sp_attack, 148); // floor(165.5 × 0.9)
        assert_eq!(stats.defense, 165); // 中性项
    }

    #[test]
    fn test_adamant_beats_modest_on_attack() {
        let adamant = compute_stats(50, &profile(31, 0, Some(Nature::Adamant)));
        let modest = compute_stats(50, &profile(31, 0, Some(Nature::Modest)));
        assert!(adamant.attack > modest.attack);
        assert!(adamant.sp_attack < modest.sp_attack);
        assert_eq!(adamant.hp, modest.hp); // HP不受性格影响
    }

    #[test]
    fn test_unset_nature_is_neutral() {
        let unset = compute_stats(42, &profile(15, 40, None));
        let hardy = compute_stats(42, &profile(15, 40, Some(Nature::Hardy)));
        assert_eq!(unset, hardy);
    }

    #[test]
    fn test_ev_monotonic() {
        let mut previous = 0u16;
        for ev in 0..=EV_CAP {
            let mut p = profile(10, 0, Some(Nature::Hardy));
            p.evs.attack = ev;
            let attack = compute_stats(75, &p).attack;
            assert!(attack >= previous, "EV {} 使攻击下降", ev);
            previous = attack;
        }
    }

    #[test]
    fn test_nature_table_consistency() {
        let mut neutral_count = 0;
        for nature in Nature::ALL {
            match (nature.boosted(), nature.hindered()) {
                (Some(up), Some(down)) => {
                    assert_ne!(up, down, "{} 强化和削弱同一属性", nature);
                    assert_ne!(up, StatType::Hp);
                    assert_ne!(down, StatType::Hp);
                }
                (None, None) => neutral_count += 1,
                _ => panic!("{} 的强化/削弱不成对", nature),
            }
        }
        assert_eq!(neutral_count, 5);
    }

    #[test]
    fn test_nature_name_roundtrip() {
        for nature in Nature::ALL {
            assert_eq!(Nature::from_name(nature.name()), Some(nature));
        }
        assert_eq!(Nature::from_name("Spicy"), None);
    }

    #[test]
    fn test_random_ivs_in_range() {
        let mut rng = RandomGenerator::with_seed(11);
        for _ in 0..100 {
            let ivs = StatBlock::random_ivs(&mut rng);
            for stat in StatType::ALL {
                assert!(ivs.get(stat) <= IV_MAX);
            }
        }
    }
}

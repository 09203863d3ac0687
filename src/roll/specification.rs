// 掷取规格注册表
// 开发心理：每个主题道具是一份声明式约束，进程启动时注册、全程只读
// 覆盖键遵循槽位命名约定：species/species_all/species{N}/type/types/type{N}/attribute

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 融合策略三态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusionPolicy {
    /// 强制融合
    Forced,
    /// 禁止融合
    Forbidden,
    /// 不约束
    Unconstrained,
}

/// 覆盖参数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    List(Vec<String>),
    Text(String),
    Number(i64),
    Flag(bool),
}

/// 主题道具的掷取规格，静态定义、不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollSpecification {
    /// 唯一键
    pub name: String,
    /// 掷取次数，至少1
    pub roll_count: u32,
    pub fusion_policy: FusionPolicy,
    /// Unconstrained下的显式"不允许融合"开关
    pub allow_fusion: bool,
    /// 类型数下限
    pub min_type_count: Option<u32>,
    /// 覆盖参数，键按槽位命名约定解释
    pub override_parameters: Vec<(String, OverrideValue)>,
    pub category: String,
    pub theme: String,
}

impl Default for RollSpecification {
    fn default() -> Self {
        Self {
            name: String::new(),
            roll_count: 1,
            fusion_policy: FusionPolicy::Unconstrained,
            allow_fusion: true,
            min_type_count: None,
            override_parameters: Vec::new(),
            category: String::new(),
            theme: String::new(),
        }
    }
}

fn list(values: &[&str]) -> OverrideValue {
    OverrideValue::List(values.iter().map(|value| value.to_string()).collect())
}

fn ov(key: &str, value: OverrideValue) -> (String, OverrideValue) {
    (key.to_string(), value)
}

lazy_static! {
    static ref SPECIFICATIONS: Vec<RollSpecification> = build_catalog();
}

/// 全部规格，定义顺序
pub fn all() -> &'static [RollSpecification] {
    &SPECIFICATIONS
}

/// 按名称查找，未注册返回None
pub fn get_by_name(name: &str) -> Option<&'static RollSpecification> {
    SPECIFICATIONS.iter().find(|spec| spec.name == name)
}

pub fn list_by_category(category: &str) -> Vec<&'static RollSpecification> {
    SPECIFICATIONS
        .iter()
        .filter(|spec| spec.category == category)
        .collect()
}

pub fn list_by_theme(theme: &str) -> Vec<&'static RollSpecification> {
    SPECIFICATIONS
        .iter()
        .filter(|spec| spec.theme == theme)
        .collect()
}

/// 去重后的主题列表
pub fn list_themes() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    SPECIFICATIONS
        .iter()
        .map(|spec| spec.theme.as_str())
        .filter(|theme| seen.insert(*theme))
        .collect()
}

/// 去重后的分类列表
pub fn list_categories() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    SPECIFICATIONS
        .iter()
        .map(|spec| spec.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

fn build_catalog() -> Vec<RollSpecification> {
    vec![
        RollSpecification {
            name: "Resolution Rocket".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov("force_fusion", OverrideValue::Flag(true)),
                ov("attribute", list(&["Future Paradox", "Past Paradox"])),
            ],
            category: "American Holidays".to_string(),
            theme: "New Year's".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Love Velvet Cake".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov(
                    "species",
                    list(&[
                        "Cupistol", "Dandoodle", "Ray O'Light", "Auntie Heart", "Love-tune",
                        "Peppillon", "Lillymon", "Rosemon", "Curemon",
                        "Lopmon (Cherubimon Virtue form)", "Pucchiemon", "CresGarurumon",
                        "Luvdisc", "Alomomola", "Smoochum", "Jynx", "Togekiss", "Togetic",
                        "Fidough", "Dachsbun", "Milcery", "Alcremie", "Spritzee", "Aromatisse",
                        "Sylveon", "Chansey", "Blissey", "Lopunny", "Tandemaus", "Maushold",
                    ]),
                ),
                ov("type1", list(&["Fairy", "Psychic", "Normal", "Flying"])),
                ov("type2", list(&["Fairy", "Psychic", "Normal", "Flying"])),
                ov("type3", list(&["Fairy", "Psychic", "Normal", "Flying"])),
            ],
            category: "American Holidays".to_string(),
            theme: "Valentine's Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Lucky Leprechaun's Loot".to_string(),
            override_parameters: vec![
                ov("type1", list(&["Grass"])),
                ov("attribute", list(&["Lucky"])),
            ],
            category: "American Holidays".to_string(),
            theme: "St. Patrick's Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Can't Believe It's Not Butter".to_string(),
            override_parameters: vec![ov(
                "attribute",
                list(&[
                    "Trash", "Raccoon", "Snake", "Shoe", "Artist", "Silly", "Mongoose",
                    "Architecture", "Water Bottle", "Oppression", "Vile", "Cute", "Prank",
                    "Organic", "Geometric", "Illegal",
                ]),
            )],
            category: "American Holidays".to_string(),
            theme: "April Fool's Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Bunny's Basket Bonanza".to_string(),
            override_parameters: vec![ov(
                "species",
                list(&[
                    "Robonyan", "Usapyon", "Blizzaria", "Frostail", "Shmoopie", "Happierre",
                    "Peppillon", "Antylamon", "Cutemon", "Lopmon", "Terriermon", "Gazimon",
                    "Falcomon", "Harpymon", "Hououmon", "Reppamon", "Deeromon", "Valkyrimon",
                    "Bunnelby", "Diggersby", "Scorbunny", "Buneary", "Lopunny", "Azumarill",
                    "Pidgey", "Pidgeot", "Noctowl", "Rowlet", "Decidueye", "Hoothoot",
                    "Oricorio", "Sawsbuck", "Stantler", "Xerneas", "Shaymin (Sky Form)",
                    "Swanna",
                ]),
            )],
            category: "American Holidays".to_string(),
            theme: "Easter".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Star-Spangled Sparkler".to_string(),
            fusion_policy: FusionPolicy::Forbidden,
            category: "American Holidays".to_string(),
            theme: "Independence Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Fright Night Fudge".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov("species1", list(&["Pumpkinmon", "Gotsumon", "Wizardmon"])),
                ov("attribute", list(&["Spooky"])),
            ],
            category: "American Holidays".to_string(),
            theme: "Halloween".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Turkey Trot Tonic".to_string(),
            override_parameters: vec![
                ov(
                    "species1",
                    list(&[
                        "Jibanyan", "Komasan", "Usapyon", "Agumon", "Gabumon", "Terriermon",
                        "Renamon", "Lopmon", "Dorumon", "Bulbasaur", "Charmander", "Squirtle",
                        "Chikorita", "Cyndaquil", "Totodile", "Treecko", "Torchic", "Mudkip",
                        "Turtwig", "Chimchar", "Piplup", "Snivy", "Tepig", "Oshawott",
                        "Chespin", "Fennekin", "Froakie", "Rowlet", "Litten", "Popplio",
                        "Grookey", "Scorbunny", "Sobble", "Sprigatito", "Fuecoco", "Quaxly",
                    ]),
                ),
                ov("attribute", list(&["Thankful"])),
            ],
            category: "American Holidays".to_string(),
            theme: "Thanksgiving".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Jolly Holly Jamboree".to_string(),
            override_parameters: vec![
                ov(
                    "species",
                    list(&[
                        "Illuminoct", "Blizzaria", "Frostail", "Dracunyan", "SantaAgumon",
                        "IceDevimon", "Frigimon", "Penguinmon", "Mojyamon", "Delibird",
                        "Snover", "Abomasnow", "Stantler", "Darmanitan (Galarian form)",
                        "Eiscue", "Alolan Vulpix", "Alolan Ninetales", "Froslass", "Chingling",
                    ]),
                ),
                ov("attribute", list(&["Vaccine"])),
                ov("type", list(&["Ice", "Fire", "Grass"])),
            ],
            category: "American Holidays".to_string(),
            theme: "Christmas".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Sweet Shofar Surprise".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov("species_all", list(&["Applin", "Sigh-Durr", "Appak"]))],
            category: "Jewish Holidays".to_string(),
            theme: "Rosh Hashanah".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Day of Atonement Amulet".to_string(),
            allow_fusion: false,
            override_parameters: vec![
                ov("type1", list(&["Normal"])),
                ov("max_types", OverrideValue::Number(1)),
            ],
            category: "Jewish Holidays".to_string(),
            theme: "Yom Kippur".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Harvest Haven Hummus".to_string(),
            override_parameters: vec![ov("type1", list(&["Ground", "Rock"]))],
            category: "Jewish Holidays".to_string(),
            theme: "Sukkot".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Latke Lightning in a Jar".to_string(),
            override_parameters: vec![ov("type1", list(&["Electric"]))],
            category: "Jewish Holidays".to_string(),
            theme: "Hanukkah".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Sectored Cookie".to_string(),
            fusion_policy: FusionPolicy::Forced,
            min_type_count: Some(3),
            category: "Jewish Holidays".to_string(),
            theme: "Purim".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Matzah Marvel".to_string(),
            override_parameters: vec![ov("type1", list(&["Fire"]))],
            category: "Jewish Holidays".to_string(),
            theme: "Passover".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Frosty Czar's Confection".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov("type1", list(&["Ice"]))],
            category: "Russian Holidays".to_string(),
            theme: "New Year's".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Snowflake Samovar".to_string(),
            override_parameters: vec![ov(
                "species1",
                list(&[
                    "Jibanyan", "Komashura", "Blazion", "Mochismo", "Candlemon", "Meramon",
                    "Volcdramon", "Firamon", "Flamon", "Torkoal", "Cyndaquil", "Quilava",
                    "Typhlosion", "Tepig", "Pignite", "Emboar", "Fuecoco", "Polteageist",
                    "Sinistea", "Alcremie", "Fidough", "Dachsbun", "Heatmor", "Ponyta",
                    "Rapidash",
                ]),
            )],
            category: "Russian Holidays".to_string(),
            theme: "Old New Year".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Brave Bear Barrel".to_string(),
            roll_count: 2,
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov(
                "species1",
                list(&[
                    "Bearmon", "Kumamon", "Grizzlymon", "Pandamon", "Teddiursa", "Ursaring",
                    "Pancham", "Pangoro", "Stufful", "Bewear", "Cubchoo", "Beartic",
                ]),
            )],
            category: "Russian Holidays".to_string(),
            theme: "Defender of the Fatherland Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Victory Vodka Vortex".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov("type", list(&["Fire"]))],
            category: "Russian Holidays".to_string(),
            theme: "Victory Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Pancake Palooza".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov("species1", list(&["Pancake"])),
                ov("attribute", list(&["Syrupy"])),
            ],
            category: "Russian Holidays".to_string(),
            theme: "Maslenitsa".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Diwali Dazzle Diyas".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov("attribute", list(&["Radiant"])),
                ov("type1", list(&["Fire", "Fairy"])),
            ],
            category: "Indian Holidays".to_string(),
            theme: "Diwali".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Color Carnival Concoction".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov("attribute", list(&["Vibrant"])),
                ov("type1", list(&["Red", "Blue", "Green", "Yellow", "Purple"])),
                ov("type2", list(&["Red", "Blue", "Green", "Yellow", "Purple"])),
                ov("type3", list(&["Red", "Blue", "Green", "Yellow", "Purple"])),
                ov("type4", list(&["Red", "Blue", "Green", "Yellow", "Purple"])),
                ov("type5", list(&["Red", "Blue", "Green", "Yellow", "Purple"])),
            ],
            category: "Indian Holidays".to_string(),
            theme: "Holi".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Raksha Rhapsody".to_string(),
            override_parameters: vec![ov(
                "species1",
                list(&[
                    "Multimutt", "Manyard", "Tengloom", "Shoutmon X4", "Knightmon & Pawns",
                    "Sistermon Blanc & Noir", "Numemon", "Tandemaus", "Maushold", "Falinks",
                    "Dugtrio", "Dodrio", "Exeggcute", "Exeggutor",
                ]),
            )],
            category: "Indian Holidays".to_string(),
            theme: "Raksha Bandhan".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Ganesh's Glorious Goodie".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![
                ov("species1", list(&["Milcery"])),
                ov("species2", list(&["Phanpy"])),
                ov("attribute", list(&["Lucky", "Wise"])),
            ],
            category: "Indian Holidays".to_string(),
            theme: "Ganesh Chaturthi".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Tricolor Triumph Tonic".to_string(),
            override_parameters: vec![ov("attribute", list(&["Tricolor"]))],
            category: "Indian Holidays".to_string(),
            theme: "Independence Day".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Lunar Lantern Loot".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov(
                "species1",
                list(&[
                    "Sparklung", "Ratman", "Tigreus", "Snaggly", "Monzaemon", "Dragomon",
                    "Gazimon", "Terriermon", "Lopmon", "Apemon", "Rattata", "Raticate",
                    "Raichu", "Pikachu", "Minun", "Plusle", "Pachirisu", "Emolga", "Morpeko",
                    "Hisuian Lilligant", "Dratini", "Dragonair", "Dragonite", "Infernape",
                    "Serperior", "Bouffalant", "Pyroar",
                ]),
            )],
            category: "Chinese Holidays".to_string(),
            theme: "Lunar New Year".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Dragon Dance Delight".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov("type", list(&["Dragon"]))],
            category: "Chinese Holidays".to_string(),
            theme: "Lunar New Year".to_string(),
            ..Default::default()
        },
        RollSpecification {
            name: "Fortune Cookie Fusions".to_string(),
            fusion_policy: FusionPolicy::Forced,
            override_parameters: vec![ov("attribute", list(&["Fortunate"]))],
            category: "Chinese Holidays".to_string(),
            theme: "Lunar New Year".to_string(),
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_unique_names() {
        let specs = all();
        assert_eq!(specs.len(), 28);

        let mut names = HashSet::new();
        for spec in specs {
            assert!(names.insert(spec.name.as_str()), "重复的规格名: {}", spec.name);
            assert!(spec.roll_count >= 1);
        }
    }

    #[test]
    fn test_get_by_name() {
        let spec = get_by_name("Sectored Cookie").unwrap();
        assert_eq!(spec.fusion_policy, FusionPolicy::Forced);
        assert_eq!(spec.min_type_count, Some(3));

        assert!(get_by_name("Nonexistent Trinket").is_none());
    }

    #[test]
    fn test_list_by_category() {
        let jewish = list_by_category("Jewish Holidays");
        assert_eq!(jewish.len(), 6);
        assert!(jewish.iter().all(|spec| spec.category == "Jewish Holidays"));
    }

    #[test]
    fn test_list_by_theme() {
        // 农历新年下有三件道具
        assert_eq!(list_by_theme("Lunar New Year").len(), 3);
        assert!(list_by_theme("Arbor Day").is_empty());
    }

    #[test]
    fn test_themes_and_categories_deduplicated() {
        let themes = list_themes();
        let unique: HashSet<_> = themes.iter().collect();
        assert_eq!(themes.len(), unique.len());
        assert_eq!(themes.iter().filter(|theme| **theme == "Lunar New Year").count(), 1);

        let categories = list_categories();
        assert_eq!(categories.len(), 5);
    }
}

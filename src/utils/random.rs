// 随机数生成器
// 开发心理：引擎的全部随机性集中到一个可注入的生成器，测试用固定种子钉住结果
// 权重选择采用累计权重扫描，性别生成与招式来源选择共用这一个实现

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 可注入种子的随机数生成器
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: StdRng,
    seed: u64,
}

/// 带权重的候选项
#[derive(Debug, Clone)]
pub struct WeightedItem<T> {
    pub item: T,
    pub weight: f32,
}

impl<T> WeightedItem<T> {
    pub fn new(item: T, weight: f32) -> Self {
        Self { item, weight }
    }
}

impl RandomGenerator {
    /// 随机种子创建
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// 指定种子创建，相同种子产生相同序列
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 生成 [min, max) 范围的整数
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..max)
    }

    /// 生成 [min, max] 范围的整数
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..=max)
    }

    /// 生成 [min, max) 范围的浮点数
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// 生成 [0, 1) 的浮点数
    pub fn probability(&mut self) -> f64 {
        self.range_f64(0.0, 1.0)
    }

    /// 按概率判定
    pub fn chance(&mut self, probability: f64) -> bool {
        self.probability() < probability.clamp(0.0, 1.0)
    }

    /// 从切片中等概率选择一个元素
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// 从切片中等概率选择并克隆
    pub fn choose_cloned<T: Clone>(&mut self, items: &[T]) -> Option<T> {
        self.choose(items).cloned()
    }

    /// 基于权重选择元素，权重和必须为正
    pub fn weighted_choose<'a, T>(&mut self, items: &'a [WeightedItem<T>]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }

        let total_weight: f32 = items.iter().map(|entry| entry.weight).sum();
        if total_weight <= 0.0 {
            return None;
        }

        let mut remaining = self.range_f64(0.0, total_weight as f64) as f32;
        for entry in items {
            remaining -= entry.weight;
            if remaining <= 0.0 {
                return Some(&entry.item);
            }
        }

        // 浮点累计误差落到末尾
        items.last().map(|entry| &entry.item)
    }

    /// 随机打乱切片
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

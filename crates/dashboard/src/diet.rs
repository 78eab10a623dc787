use {
    rand::Rng,
    std::time::Duration,
    tokio::{
        sync::watch,
        time::{Instant, MissedTickBehavior},
    },
};

pub const GENERATE_DURATION: Duration = Duration::from_millis(4000);
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(200);

pub const GENERATE_PHASES: [&str; 4] = [
    "Analyzing your profile and goals...",
    "Building your personalized meal plan...",
    "Optimizing for posture and recovery...",
    "Finalizing recommendations...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meals {
    pub breakfast: &'static str,
    pub lunch: &'static str,
    pub dinner: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    pub day: &'static str,
    pub meals: Meals,
}

/// A week of meals with a few tips.
#[derive(Debug, PartialEq, Eq)]
pub struct DietPlan {
    pub title: &'static str,
    pub intro: &'static str,
    pub days: [DayPlan; 7],
    pub tips: [&'static str; 3],
}

const fn day(
    day: &'static str,
    breakfast: &'static str,
    lunch: &'static str,
    dinner: &'static str,
) -> DayPlan {
    DayPlan {
        day,
        meals: Meals {
            breakfast,
            lunch,
            dinner,
        },
    }
}

pub static PLANS: [DietPlan; 4] = [
    DietPlan {
        title: "Balanced support for posture & recovery",
        intro:
            "Anti-inflammatory foods and nutrients that support joint flexibility and muscle recovery.",
        days: [
            day(
                "Monday",
                "Oatmeal with banana, walnuts, cinnamon. Green tea.",
                "Grilled chicken salad with leafy greens, olive oil, quinoa.",
                "Salmon with steamed broccoli and sweet potato. Greek yogurt.",
            ),
            day(
                "Tuesday",
                "Greek yogurt with berries and honey. Avocado toast.",
                "Lentil soup with whole-grain bread. Apple.",
                "Turkey stir-fry with brown rice and mixed vegetables.",
            ),
            day(
                "Wednesday",
                "Smoothie: spinach, banana, almond milk, protein powder.",
                "Tuna wrap with greens and hummus.",
                "Baked cod with asparagus and couscous.",
            ),
            day(
                "Thursday",
                "Scrambled eggs with spinach and whole-grain toast.",
                "Chickpea and cucumber salad with olive oil dressing.",
                "Grilled paneer/tofu with roasted vegetables.",
            ),
            day(
                "Friday",
                "Chia pudding with almonds and berries.",
                "Brown rice bowl with grilled chicken and veggies.",
                "Vegetable soup with whole-grain bread and yogurt.",
            ),
            day(
                "Saturday",
                "Porridge with flaxseeds and banana.",
                "Rajma (kidney beans) with brown rice and salad.",
                "Grilled fish with sautéed greens.",
            ),
            day(
                "Sunday",
                "Omelet with mushrooms and tomatoes.",
                "Quinoa salad with mixed vegetables and feta.",
                "Light chicken soup with whole-grain toast.",
            ),
        ],
        tips: [
            "Drink 2–2.5L water daily.",
            "Include omega-3 rich foods for joint health.",
            "Protein in every meal for muscle repair.",
        ],
    },
    DietPlan {
        title: "Energy & muscle-friendly plan",
        intro:
            "Focused on sustained energy and nutrients for muscle function and injury prevention.",
        days: [
            day(
                "Monday",
                "Eggs with whole-grain toast and spinach.",
                "Chickpea bowl with tahini and pita.",
                "Grilled chicken with roasted vegetables and rice.",
            ),
            day(
                "Tuesday",
                "Cottage cheese with pineapple and almonds.",
                "Turkey avocado sandwich. Carrot sticks.",
                "Salmon with quinoa and mixed salad.",
            ),
            day(
                "Wednesday",
                "Porridge with nuts and berries.",
                "Bean chili with greens.",
                "Tofu stir-fry with brown rice.",
            ),
            day(
                "Thursday",
                "Smoothie bowl with seeds and fruits.",
                "Paneer wrap with whole wheat tortilla.",
                "Lean beef/chicken curry with roti.",
            ),
            day(
                "Friday",
                "Boiled eggs and fruit bowl.",
                "Quinoa and grilled vegetables.",
                "Baked fish with sweet potato.",
            ),
            day(
                "Saturday",
                "Oats with peanut butter and banana.",
                "Dal with brown rice and salad.",
                "Chicken soup with whole-grain toast.",
            ),
            day(
                "Sunday",
                "Greek yogurt parfait.",
                "Vegetable pulao with raita.",
                "Grilled tofu/paneer with sautéed vegetables.",
            ),
        ],
        tips: [
            "Eat every 3-4 hours.",
            "Include magnesium-rich foods.",
            "Reduce processed foods.",
        ],
    },
    DietPlan {
        title: "Vegetarian joint & recovery plan",
        intro: "Plant-based plan focused on reducing inflammation and supporting posture.",
        days: [
            day(
                "Monday",
                "Oats with almond milk and flaxseeds.",
                "Rajma with brown rice.",
                "Tofu stir-fry with vegetables.",
            ),
            day(
                "Tuesday",
                "Smoothie: banana, peanut butter, soy milk.",
                "Chickpea salad bowl.",
                "Vegetable khichdi with yogurt.",
            ),
            day(
                "Wednesday",
                "Whole-grain toast with avocado.",
                "Lentil soup and salad.",
                "Paneer with sautéed greens.",
            ),
            day(
                "Thursday",
                "Chia pudding with berries.",
                "Tofu wrap.",
                "Mixed vegetable curry with roti.",
            ),
            day(
                "Friday",
                "Greek yogurt with nuts.",
                "Quinoa bowl with beans.",
                "Palak paneer with brown rice.",
            ),
            day("Saturday", "Porridge with seeds.", "Vegetable pulao.", "Dal and roti."),
            day("Sunday", "Fruit smoothie.", "Chole with salad.", "Light vegetable soup."),
        ],
        tips: [
            "Add flaxseed for omega-3.",
            "Combine protein sources (dal + rice).",
            "Stay hydrated.",
        ],
    },
    DietPlan {
        title: "High-protein injury prevention plan",
        intro: "Higher protein intake to support muscle repair and reduce injury risk.",
        days: [
            day(
                "Monday",
                "Protein smoothie with whey and banana.",
                "Grilled chicken with quinoa.",
                "Salmon with broccoli.",
            ),
            day(
                "Tuesday",
                "Egg omelet with vegetables.",
                "Turkey sandwich with whole grain.",
                "Lean beef with brown rice.",
            ),
            day(
                "Wednesday",
                "Greek yogurt with nuts.",
                "Paneer bowl with vegetables.",
                "Grilled fish with salad.",
            ),
            day(
                "Thursday",
                "Oats with protein powder.",
                "Chicken salad with olive oil.",
                "Tofu stir fry.",
            ),
            day("Friday", "Boiled eggs and fruit.", "Dal with rice.", "Chicken curry with roti."),
            day(
                "Saturday",
                "Cottage cheese with almonds.",
                "Grilled paneer wrap.",
                "Fish with sweet potato.",
            ),
            day("Sunday", "Protein pancakes.", "Vegetable quinoa bowl.", "Light chicken soup."),
        ],
        tips: [
            "Aim for protein in every meal.",
            "Post-workout protein within 45 minutes.",
            "Include stretching with nutrition plan.",
        ],
    },
];

/// How far a plan generation has come.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 0 to 100.
    pub percent: f32,
    /// Index into `GENERATE_PHASES`.
    pub phase: usize,
}

impl Progress {
    pub fn label(&self) -> &'static str {
        GENERATE_PHASES[self.phase.min(GENERATE_PHASES.len() - 1)]
    }

    pub fn is_done(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Progress after `elapsed` of the fixed-length generation.
pub fn progress(elapsed: Duration) -> Progress {
    let fraction = elapsed.as_secs_f32() / GENERATE_DURATION.as_secs_f32();
    let step = (fraction * GENERATE_PHASES.len() as f32).floor() as usize;
    Progress {
        percent: (fraction * 100.0).min(100.0),
        phase: step.min(GENERATE_PHASES.len() - 1),
    }
}

/// Produces a diet plan after a fixed generation delay, reporting progress
/// every 200 ms.
pub struct DietPlanner {
    progress: watch::Sender<Progress>,
}

impl Default for DietPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DietPlanner {
    pub fn new() -> Self {
        let (progress, _) = watch::channel(progress(Duration::ZERO));
        Self { progress }
    }

    pub fn progress(&self) -> Progress {
        *self.progress.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    pub async fn generate(&self) -> &'static DietPlan {
        let start = Instant::now();
        self.progress.send_replace(progress(Duration::ZERO));

        let mut ticker = tokio::time::interval_at(start + PROGRESS_INTERVAL, PROGRESS_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = tokio::time::sleep_until(start + GENERATE_DURATION);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => break,
                _ = ticker.tick() => {
                    self.progress.send_replace(progress(start.elapsed()));
                }
            }
        }

        self.progress.send_replace(progress(GENERATE_DURATION));
        let index = rand::thread_rng().gen_range(0..PLANS.len());
        log::debug!("generated diet plan {}", index + 1);
        &PLANS[index]
    }
}

//! Resolves arguments, environment and content files into one encounter setup.
//!
//! Precedence, highest first: command-line flags, the rules file, environment
//! variables, the bundled rules.

use anyhow::{Context, Result};

use game_content::{ConfigLoader, CreatureCatalog};
use game_core::{GameConfig, Side};
use runtime::{Placement, ProviderKind, RuntimeConfig, Scenario, TieBreak};

use crate::args::Args;

/// Everything needed to start an encounter.
#[derive(Debug, Clone)]
pub struct Settings {
    pub seed: u64,
    pub runtime: RuntimeConfig,
    pub catalog: CreatureCatalog,
    pub scenario: Scenario,
    /// Whether a human answers the hero's prompts.
    pub interactive: bool,
    pub tie_break: TieBreak,
}

impl Settings {
    /// Runtime defaults with the bundled rules, before any override.
    pub fn base() -> Result<RuntimeConfig> {
        let rules = ConfigLoader::builtin().context("loading bundled rules")?;
        Ok(RuntimeConfig::default().with_game_config(rules))
    }

    pub fn resolve(args: &Args, base: RuntimeConfig) -> Result<Self> {
        let mut runtime = base;

        if let Some(path) = &args.rules {
            let rules = ConfigLoader::load(path)
                .with_context(|| format!("loading rules from {}", path.display()))?;
            runtime = runtime.with_game_config(rules);
        }
        if let Some(max_rounds) = args.max_rounds {
            runtime = runtime.with_game_config(GameConfig::with_max_rounds(max_rounds));
        }

        let seed = args.seed.or(runtime.seed).unwrap_or_else(rand::random);
        runtime.seed = Some(seed);

        let mut catalog = CreatureCatalog::builtin().context("loading built-in bestiary")?;
        if let Some(path) = &args.catalog {
            let extra = CreatureCatalog::load(path)
                .with_context(|| format!("loading creature catalog {}", path.display()))?;
            catalog.extend(extra);
        }

        let interactive = !args.auto;
        let control = if interactive {
            ProviderKind::Human
        } else {
            ProviderKind::Scripted
        };
        let hero = Placement::new(args.hero.clone(), Side::Players)
            .with_heals(args.heals)
            .controlled_by(control);
        let mut scenario = Scenario::skirmish(hero, args.monsters());
        if args.planner {
            scenario.control_side(Side::Enemies, ProviderKind::Planner);
        }

        Ok(Self {
            seed,
            runtime,
            catalog,
            scenario,
            interactive,
            tie_break: args.tie_break(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("skirmish").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flag_seed_wins_over_environment() {
        let base = RuntimeConfig::default().with_seed(1);
        let settings = Settings::resolve(&parse(&["--seed", "42"]), base).unwrap();
        assert_eq!(settings.seed, 42);

        let base = RuntimeConfig::default().with_seed(1);
        let settings = Settings::resolve(&parse(&[]), base).unwrap();
        assert_eq!(settings.seed, 1);
    }

    #[test]
    fn max_rounds_flag_overrides_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("rules.toml");
        std::fs::write(&rules, "max_rounds = 9\n").unwrap();
        let rules = rules.to_str().unwrap();

        let settings =
            Settings::resolve(&parse(&["--rules", rules]), RuntimeConfig::default()).unwrap();
        assert_eq!(settings.runtime.game_config.max_rounds, 9);

        let settings = Settings::resolve(
            &parse(&["--rules", rules, "--max-rounds", "3"]),
            RuntimeConfig::default(),
        )
        .unwrap();
        assert_eq!(settings.runtime.game_config.max_rounds, 3);
    }

    #[test]
    fn extra_catalog_adds_creatures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.ron");
        std::fs::write(
            &path,
            r#"{
                "imp": (
                    name: "Imp",
                    max_hp: 10,
                    armor_class: 13,
                    attacks: [(name: "Sting", attack_bonus: 5, damage: "1d4+3", damage_type: "piercing")],
                ),
            }"#,
        )
        .unwrap();

        let args = parse(&["--catalog", path.to_str().unwrap(), "--monster", "imp"]);
        let settings = Settings::resolve(&args, RuntimeConfig::default()).unwrap();
        assert!(settings.catalog.get("imp").is_some());
        assert!(settings.catalog.get("goblin").is_some());
        assert_eq!(settings.scenario.placements.len(), 2);
    }

    #[test]
    fn auto_mode_scripts_the_hero() {
        let settings = Settings::resolve(&parse(&["--auto"]), RuntimeConfig::default()).unwrap();
        assert!(!settings.interactive);
        assert_eq!(
            settings.scenario.placements[0].control,
            Some(ProviderKind::Scripted)
        );
    }

    #[test]
    fn bundled_rules_are_the_base_layer() {
        let base = Settings::base().unwrap();
        assert_eq!(base.game_config, ConfigLoader::builtin().unwrap());

        let settings = Settings::resolve(&parse(&["--seed", "1"]), base).unwrap();
        assert_eq!(
            settings.runtime.game_config.max_rounds,
            GameConfig::DEFAULT_MAX_ROUNDS
        );
    }

    #[test]
    fn planner_flag_takes_over_the_monsters() {
        let args = parse(&["--planner", "--monster", "orc", "--monster", "wolf"]);
        let settings = Settings::resolve(&args, RuntimeConfig::default()).unwrap();
        let controls: Vec<_> = settings
            .scenario
            .placements
            .iter()
            .map(|p| p.control)
            .collect();
        assert_eq!(
            controls,
            vec![
                Some(ProviderKind::Human),
                Some(ProviderKind::Planner),
                Some(ProviderKind::Planner),
            ]
        );
    }

    #[test]
    fn missing_rules_file_is_reported() {
        let err = Settings::resolve(
            &parse(&["--rules", "/nonexistent/rules.toml"]),
            RuntimeConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/rules.toml"));
    }
}

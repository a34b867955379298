//! End-to-end encounters driven through the async runner.

use async_trait::async_trait;
use game_content::CreatureCatalog;
use game_core::{Action, CombatantId, Dice, EngineError, EventKind, GameConfig, Side};
use runtime::{
    ActionProvider, ActionRequest, EncounterResult, EncounterRunner, EventBus, HumanProvider,
    Placement, PlannerProvider, ProviderKind, ProviderRegistry, RuntimeError, Scenario,
    ScriptedProvider, TieBreak, Topic,
};

const HERO: CombatantId = CombatantId(1);

fn catalog() -> CreatureCatalog {
    CreatureCatalog::builtin().expect("builtin catalog loads")
}

fn runner(
    seed: u64,
    hero: Placement,
    monsters: &[&str],
    mut providers: ProviderRegistry,
) -> EncounterRunner {
    let scenario = Scenario::skirmish(hero, monsters.iter().copied());
    let builder = scenario
        .assemble(&catalog(), GameConfig::default(), &mut providers)
        .expect("scenario assembles");
    EncounterRunner::from_builder(&builder, Dice::seeded(seed), providers)
        .expect("encounter builds")
}

fn scripted_registry() -> ProviderRegistry {
    let mut providers = ProviderRegistry::new();
    providers.register(ProviderKind::Scripted, ScriptedProvider::new(TieBreak::Roll));
    providers
}

fn scripted_runner(seed: u64) -> EncounterRunner {
    runner(
        seed,
        Placement::new("hero", Side::Players).with_heals(2),
        &["goblin", "goblin", "kobold"],
        scripted_registry(),
    )
}

#[tokio::test]
async fn scripted_encounter_runs_to_completion() {
    let mut runner = scripted_runner(42);
    let result = runner.run().await.unwrap();

    assert!(result.rounds >= 1);
    let last = result.events.last().unwrap();
    assert!(matches!(last.kind, EventKind::EncounterEnded { .. }));
    assert_eq!(result.events.len(), runner.log().len());
    assert!(runner.engine().is_finished());
}

#[tokio::test]
async fn same_seed_replays_identically() {
    let first = scripted_runner(7).run().await.unwrap();
    let second = scripted_runner(7).run().await.unwrap();
    assert_eq!(first, second);

    let mut a = scripted_runner(7);
    let mut b = scripted_runner(7);
    a.run().await.unwrap();
    b.run().await.unwrap();
    assert_eq!(a.log().digest().unwrap(), b.log().digest().unwrap());
    assert_eq!(a.dice().draws(), b.dice().draws());
}

#[tokio::test]
async fn async_runner_matches_synchronous_engine() {
    let policy = ScriptedProvider::new(TieBreak::Roll);
    let mut providers = ProviderRegistry::new();
    providers.register(ProviderKind::Scripted, policy);

    let scenario = Scenario::skirmish(
        Placement::new("hero", Side::Players).with_heals(2),
        ["orc", "wolf"],
    );
    let builder = scenario
        .assemble(&catalog(), GameConfig::default(), &mut providers)
        .unwrap();

    let mut dice = Dice::seeded(1234);
    let mut engine = builder.build(&dice).unwrap();
    engine
        .run(&mut dice, |state, actor, legal, dice| {
            policy.choose(state, actor, legal, dice).unwrap()
        })
        .unwrap();

    let mut runner =
        EncounterRunner::from_builder(&builder, Dice::seeded(1234), providers).unwrap();
    let result = runner.run().await.unwrap();

    let expected: Vec<_> = engine.log().read_all().cloned().collect();
    assert_eq!(result.events, expected);
}

#[tokio::test]
async fn bus_publishes_every_event_in_order() {
    let mut runner = scripted_runner(3).with_bus(EventBus::with_capacity(4096));
    let mut all = runner.subscribe();
    let mut lifecycle = runner.subscribe_topic(Topic::Lifecycle);

    let result = runner.run().await.unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = all.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen, result.events);

    let first = lifecycle.try_recv().unwrap();
    assert!(matches!(first.kind, EventKind::EncounterStarted { .. }));
    let mut last = first;
    while let Ok(event) = lifecycle.try_recv() {
        last = event;
    }
    assert!(matches!(last.kind, EventKind::EncounterEnded { .. }));
}

#[tokio::test]
async fn human_input_is_reprompted_until_valid() {
    let (human, mut prompts) = HumanProvider::channel(1);
    let mut providers = scripted_registry();
    providers.register(ProviderKind::Human, human);

    let responder = tokio::spawn(async move {
        let mut rejections = Vec::new();
        let mut script = ["abc", "99"].into_iter();
        while let Some(request) = prompts.recv().await {
            assert_eq!(request.actor, HERO);
            rejections.push(request.rejection.clone());
            let answer = script.next().unwrap_or("1");
            let _ = request.reply.send(answer.to_owned());
        }
        rejections
    });

    let mut runner = runner(
        11,
        Placement::new("hero", Side::Players).controlled_by(ProviderKind::Human),
        &["goblin"],
        providers,
    );
    let result = runner.run().await.unwrap();
    assert!(matches!(
        result.events.last().unwrap().kind,
        EventKind::EncounterEnded { .. }
    ));
    drop(runner);

    let rejections = responder.await.unwrap();
    assert_eq!(rejections[0], None);
    assert_eq!(rejections[1].as_deref(), Some("'abc' is not a number"));
    assert_eq!(rejections[2].as_deref(), Some("99 is not between 1 and 3"));
    assert!(rejections[3..].iter().all(Option::is_none));
}

#[tokio::test]
async fn closed_prompt_channel_cancels_cleanly() {
    let (human, prompts) = HumanProvider::channel(1);
    drop(prompts);
    let mut providers = scripted_registry();
    providers.register(ProviderKind::Human, human);

    let mut runner = runner(
        5,
        Placement::new("hero", Side::Players).controlled_by(ProviderKind::Human),
        &["goblin"],
        providers,
    );
    let err = runner.run().await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(runner.engine().awaiting(), Some(HERO));
    assert!(matches!(
        runner.log().last().unwrap().kind,
        EventKind::TurnStarted { combatant: HERO }
    ));
    assert!(!runner.engine().is_finished());
}

#[tokio::test]
async fn dropped_reply_cancels_cleanly() {
    let (human, mut prompts) = HumanProvider::channel(1);
    let mut providers = scripted_registry();
    providers.register(ProviderKind::Human, human);

    tokio::spawn(async move {
        while let Some(request) = prompts.recv().await {
            drop(request.reply);
        }
    });

    let mut runner = runner(
        5,
        Placement::new("hero", Side::Players).controlled_by(ProviderKind::Human),
        &["goblin"],
        providers,
    );
    let err = runner.run().await.unwrap_err();
    assert!(matches!(err, RuntimeError::InputCancelled { actor: HERO }));
    assert_eq!(runner.engine().awaiting(), Some(HERO));
}

#[tokio::test]
async fn unregistered_provider_kind_is_an_error() {
    let mut runner = runner(
        5,
        Placement::new("hero", Side::Players).controlled_by(ProviderKind::Human),
        &["goblin"],
        scripted_registry(),
    );
    let err = runner.run().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::ProviderNotSet {
            kind: ProviderKind::Human
        }
    ));
}

struct AttacksNobody;

#[async_trait]
impl ActionProvider for AttacksNobody {
    async fn provide_action(
        &self,
        request: &ActionRequest,
        _dice: &mut Dice,
    ) -> runtime::Result<Action> {
        Ok(Action::attack(request.actor, CombatantId(99)))
    }
}

#[tokio::test]
async fn illegal_choice_is_rejected_without_side_effects() {
    let mut providers = ProviderRegistry::new();
    providers.register(ProviderKind::Scripted, AttacksNobody);

    let mut runner = runner(9, Placement::new("hero", Side::Players), &["goblin"], providers);
    let err = runner.run().await.unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::InvalidAction { .. })
    ));
    let actor = runner.engine().awaiting().unwrap();
    assert!(matches!(
        runner.log().last().unwrap().kind,
        EventKind::TurnStarted { combatant } if combatant == actor
    ));
    // Only the two initiative rolls have been drawn.
    assert_eq!(runner.dice().draws(), 2);
}

#[tokio::test]
async fn round_limit_ends_a_stalemate() {
    let mut providers = ProviderRegistry::new();
    providers.register(ProviderKind::Scripted, runtime::PassActionProvider);

    let scenario = Scenario::skirmish(Placement::new("hero", Side::Players), ["goblin"]);
    let builder = scenario
        .assemble(&catalog(), GameConfig::with_max_rounds(3), &mut providers)
        .unwrap();
    let mut runner = EncounterRunner::from_builder(&builder, Dice::seeded(1), providers).unwrap();

    let result = runner.run().await.unwrap();
    assert_eq!(result.winner, None);
    assert_eq!(result.reason, game_core::EndReason::RoundLimit);
    assert_eq!(result.rounds, 3);
}

#[test]
fn unknown_creature_fails_assembly() {
    let mut providers = scripted_registry();
    let scenario = Scenario::skirmish(Placement::new("hero", Side::Players), ["dragon"]);
    let err = scenario
        .assemble(&catalog(), GameConfig::default(), &mut providers)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Setup(_)));
}

async fn human_game(seed: u64, script: &'static [&'static str]) -> (EncounterResult, [u8; 32]) {
    let (human, mut prompts) = HumanProvider::channel(1);
    let mut providers = scripted_registry();
    providers.register(ProviderKind::Human, human);

    tokio::spawn(async move {
        let mut answers = script.iter().cycle();
        while let Some(request) = prompts.recv().await {
            let answer = answers.next().copied().unwrap_or("1");
            let _ = request.reply.send(answer.to_owned());
        }
    });

    let mut runner = runner(
        seed,
        Placement::new("hero", Side::Players)
            .with_heals(2)
            .controlled_by(ProviderKind::Human),
        &["goblin", "kobold"],
        providers,
    );
    let result = runner.run().await.unwrap();
    let digest = runner.log().digest().unwrap();
    (result, digest)
}

#[tokio::test]
async fn same_human_inputs_replay_identically() {
    const SCRIPT: &[&str] = &["2", "abc", "1", "7", "3", "1", "4"];

    let (first, first_digest) = human_game(21, SCRIPT).await;
    let (second, second_digest) = human_game(21, SCRIPT).await;
    assert_eq!(first.events, second.events);
    assert_eq!(first_digest, second_digest);
    assert!(matches!(
        first.events.last().unwrap().kind,
        EventKind::EncounterEnded { .. }
    ));
}

#[tokio::test]
async fn feed_delivers_every_event_despite_a_tiny_bus() {
    let mut runner = scripted_runner(8).with_bus(EventBus::with_capacity(1));
    let mut feed = runner.feed(1);
    let reader = tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Some(event) = feed.recv().await {
            seen.push(event);
        }
        seen
    });

    let result = runner.run().await.unwrap();
    drop(runner);

    assert_eq!(reader.await.unwrap(), result.events);
}

fn planner_runner(seed: u64) -> EncounterRunner {
    let mut providers = scripted_registry();
    providers.register(ProviderKind::Planner, PlannerProvider::default());
    let mut scenario = Scenario::skirmish(
        Placement::new("hero", Side::Players).with_heals(2),
        ["goblin", "kobold"],
    );
    scenario.control_side(Side::Enemies, ProviderKind::Planner);
    let builder = scenario
        .assemble(&catalog(), GameConfig::default(), &mut providers)
        .expect("scenario assembles");
    EncounterRunner::from_builder(&builder, Dice::seeded(seed), providers)
        .expect("encounter builds")
}

#[tokio::test]
async fn planner_controlled_monsters_finish_and_replay() {
    let mut a = planner_runner(13);
    let mut b = planner_runner(13);
    let first = a.run().await.unwrap();
    let second = b.run().await.unwrap();

    assert!(matches!(
        first.events.last().unwrap().kind,
        EventKind::EncounterEnded { .. }
    ));
    assert_eq!(first, second);
    assert_eq!(a.dice().draws(), b.dice().draws());
}

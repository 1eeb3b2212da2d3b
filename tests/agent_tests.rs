//! Agent registry and full agent-driven matches.

use castle_duel::agents::{Agent, AgentContext, AgentRegistry, RuleBasedAgent};
use castle_duel::cards::{Card, CardId, CardRegistry, DeckSpec, Hand, Material};
use castle_duel::core::{
    Contender, ContenderId, ContenderSetup, DuelError, GameRng, Match, MatchConfig, MatchMode, Move,
    Resource, ResourcePool, Side,
};
use castle_duel::mcts::MCTSConfig;
use castle_duel::nn::{LinearValue, FEATURE_LEN};
use castle_duel::rules::{RulesEngine, TurnEngine};

fn opening(seed: u64) -> Match {
    let registry = CardRegistry::bundled().unwrap();
    let spec = DeckSpec::bundled_default().unwrap();
    let mut rng = GameRng::new(seed);
    Match::new(
        &MatchConfig::default(),
        MatchMode::CpuOnly,
        ContenderSetup::new("A", registry.load_deck(&spec, &mut rng).unwrap()),
        ContenderSetup::new("B", registry.load_deck(&spec, &mut rng).unwrap()),
        seed,
    )
}

fn play_out<'a>(m: &mut Match, a: &'a mut dyn Agent, b: &'a mut dyn Agent, cap: u32) {
    while !m.is_over() && m.turn_count < cap {
        let agent = match m.active {
            Side::A => &mut *a,
            Side::B => &mut *b,
        };
        let mv = agent.choose_move(m).unwrap();
        assert!(TurnEngine.legal_moves(m).contains(&mv), "{} chose illegal {mv}", agent.name());
        TurnEngine.apply_move(m, mv).unwrap();
    }
}

#[test]
fn test_registry_keys() {
    let registry = AgentRegistry::with_builtin();
    for key in ["random", "rule_based", "mcts", "mcts_learned"] {
        assert!(registry.contains(key), "missing {key}");
    }
    assert!(!registry.contains("BasicAIPlayer"));
}

#[test]
fn test_registry_unknown_key() {
    let registry = AgentRegistry::with_builtin();
    let created = registry.create("human", &AgentContext::new(0));
    assert!(matches!(created, Err(DuelError::Configuration(_))));
}

#[test]
fn test_random_versus_rule_based_finishes() {
    let registry = AgentRegistry::with_builtin();
    let mut a = registry.create("random", &AgentContext::new(1)).unwrap();
    let mut b = registry.create("rule_based", &AgentContext::new(2)).unwrap();

    let mut m = opening(5);
    play_out(&mut m, &mut a, &mut b, 2000);
    assert!(m.is_over());
}

#[test]
fn test_mcts_agents_play_legal_moves() {
    let registry = AgentRegistry::with_builtin();
    let mcts = MCTSConfig::default().with_iterations(40).with_depth_limit(10);
    let model = LinearValue::new(vec![0.02; FEATURE_LEN], 0.0);

    let mut a = registry.create("mcts", &AgentContext::new(3).with_mcts(mcts.clone())).unwrap();
    let ctx = AgentContext::new(4).with_mcts(mcts).with_value_model(model);
    let mut b = registry.create("mcts_learned", &ctx).unwrap();

    let mut m = opening(6);
    play_out(&mut m, &mut a, &mut b, 12);
    assert!(m.turn_count >= 12 || m.is_over());
}

#[test]
fn test_same_seed_same_choices() {
    let registry = AgentRegistry::with_builtin();
    let m = opening(9);
    for key in ["random", "rule_based", "mcts"] {
        let ctx = AgentContext::new(77).with_mcts(MCTSConfig::default().with_iterations(30).with_depth_limit(5));
        let mut first = registry.create(key, &ctx).unwrap();
        let mut second = registry.create(key, &ctx).unwrap();
        assert_eq!(first.choose_move(&m).unwrap(), second.choose_move(&m).unwrap(), "{key}");
    }
}

#[test]
fn test_rule_based_priority_order() {
    // Win-by-building outranks win-by-attack, which outranks the curse.
    let fortress = Card::new(CardId::new(Material::Bricks, 9), 18, "Fortress", "castle +20").unwrap();
    let dragon = Card::new(CardId::new(Material::Weapons, 9), 25, "Dragon", "attack 25").unwrap();
    let curse = Card::new(CardId::new(Material::Magic, 5), 25, "Curse", "enemy all -1; all +1").unwrap();

    let mut hand = Hand::new(8);
    for c in [&curse, &dragon, &fortress] {
        hand.place(c.clone());
    }
    let me = Contender::new(ContenderId::new(1), "A", 85, 0, ResourcePool::uniform(3, 30)).with_hand(hand.clone());
    let lopsided = ResourcePool::new([Resource::new(6, 0), Resource::new(1, 0), Resource::new(1, 0)]);
    let them = Contender::new(ContenderId::new(2), "B", 10, 5, lopsided).with_hand(hand);
    let mut m = Match::from_parts(MatchMode::CpuOnly, 1, me, them, Side::A, GameRng::new(0));

    let mut agent = RuleBasedAgent::new(0);
    assert_eq!(agent.choose_move(&m).unwrap(), Move::play(fortress.id));

    m.a.castle_hp = 50;
    assert_eq!(agent.choose_move(&m).unwrap(), Move::play(dragon.id));

    m.b.castle_hp = 60;
    assert_eq!(agent.choose_move(&m).unwrap(), Move::play(curse.id));
}

//! Table integration tests.

use bjtable::{
    Action, ActionError, ActionKind, BetError, Card, DealError, DealerError, DealerStep,
    DoubleOption, GameOptions, InsuranceError, Outcome, Phase, Rank, ReshuffleError, RoundError,
    Shoe, Suit, Table,
};

fn stacked(ranks: &[Rank]) -> Shoe {
    let cards: Vec<Card> = ranks
        .iter()
        .zip(0..)
        .map(|(&rank, id)| Card::new(rank, Suit::Spades, id))
        .collect();
    Shoe::from_draws(&cards)
}

/// Deals `bet` from a shoe that deals `ranks` in order:
/// player, dealer up, player, dealer hole, then any further draws.
fn deal_from(table: &Table, bet: u64, ranks: &[Rank]) -> Phase {
    table.load_shoe(stacked(ranks)).unwrap();
    table.place_bet(bet).unwrap();
    table.deal().unwrap()
}

fn ranks(cards: &[Card]) -> Vec<Rank> {
    cards.iter().map(|card| card.rank).collect()
}

#[test]
fn basic_round_flow() {
    use Rank::{Nine, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    assert_eq!(deal_from(&table, 100, &[Ten, Seven, Nine, Ten]), Phase::PlayerTurn);
    assert_eq!(table.chips(), 900);

    let state = table.snapshot();
    assert_eq!(state.player_hand.value().total, 19);
    assert_eq!(state.dealer_hand.visible_total(state.dealer_revealed), 7);

    table.stand().unwrap();
    assert_eq!(table.phase(), Phase::DealerTurn);
    assert!(table.snapshot().dealer_revealed);

    let (drawn, settlement) = table.play_dealer().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(settlement.outcome, Outcome::Win);
    assert_eq!(settlement.returned, 200);
    assert_eq!(settlement.net, 100);

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.chips, 1100);
    assert_eq!(state.result, Some(Outcome::Win));
    assert_eq!(state.stats.wins, 1);
    assert_eq!(state.message, "You win");

    table.new_round().unwrap();
    let state = table.snapshot();
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.bet, 0);
    assert_eq!(state.chips, 1100);
    assert!(state.player_hand.is_empty());
}

#[test]
fn dealer_steps_one_card_at_a_time() {
    use Rank::{Eight, Five, Six, Ten, Two};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Six, Eight, Two, Five, Ten]);
    table.stand().unwrap();

    // 6 + 2 = 8, then 13, then 23.
    let DealerStep::Drew(card) = table.dealer_step().unwrap() else {
        panic!("dealer should draw on 8");
    };
    assert_eq!(card.rank, Five);
    assert_eq!(table.phase(), Phase::DealerTurn);

    let DealerStep::Drew(card) = table.dealer_step().unwrap() else {
        panic!("dealer should draw on 13");
    };
    assert_eq!(card.rank, Ten);

    let DealerStep::Settled(settlement) = table.dealer_step().unwrap() else {
        panic!("dealer should stand once bust");
    };
    assert_eq!(settlement.outcome, Outcome::Win);
    assert_eq!(table.chips(), 1100);
    assert_eq!(
        table.dealer_step().unwrap_err(),
        DealerError::InvalidState
    );
}

#[test]
fn dealer_beats_player_after_drawing() {
    use Rank::{Eight, Five, Six, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Six, Eight, Ten, Five]);
    table.stand().unwrap();

    let (drawn, settlement) = table.play_dealer().unwrap();
    assert_eq!(ranks(&drawn), vec![Five]);
    assert_eq!(settlement.outcome, Outcome::Lose);
    assert_eq!(table.chips(), 900);
    assert_eq!(table.snapshot().stats.losses, 1);
}

#[test]
fn dealer_hits_soft_17_when_configured() {
    use Rank::{Ace, Eight, Six, Ten, Two};

    let table = Table::new(GameOptions::default().with_dealer_hits_soft_17(true), 1);
    // Dealer shows 6 with an ace in the hole: soft 17.
    deal_from(&table, 100, &[Ten, Six, Eight, Ace, Two]);
    table.stand().unwrap();

    let (drawn, settlement) = table.play_dealer().unwrap();
    assert_eq!(ranks(&drawn), vec![Two]);
    assert_eq!(settlement.outcome, Outcome::Lose);
}

#[test]
fn dealer_stands_on_soft_17_by_default() {
    use Rank::{Ace, Eight, Six, Ten, Two};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Six, Eight, Ace, Two]);
    table.stand().unwrap();

    let (drawn, settlement) = table.play_dealer().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(settlement.outcome, Outcome::Win);
}

#[test]
fn player_natural_settles_on_the_deal() {
    use Rank::{Ace, King, Nine, Seven};

    let table = Table::new(GameOptions::default(), 1);
    assert_eq!(deal_from(&table, 100, &[Ace, Nine, King, Seven]), Phase::GameOver);

    let state = table.snapshot();
    assert_eq!(state.result, Some(Outcome::Blackjack));
    assert_eq!(state.chips, 1150);
    assert!(state.dealer_revealed);
    assert_eq!(state.message, "Blackjack!");
}

#[test]
fn six_to_five_blackjack_rounds_the_payout() {
    use Rank::{Ace, King, Nine, Seven};

    let options = GameOptions::default().with_blackjack_pays(1.2);
    let table = Table::new(options, 1);
    deal_from(&table, 25, &[Ace, Nine, King, Seven]);

    // 25 * 1.2 = 30 on top of the returned stake.
    assert_eq!(table.chips(), 1030);
}

#[test]
fn dealer_natural_without_ace_up_settles_on_the_deal() {
    use Rank::{Ace, Nine, Ten};

    let table = Table::new(GameOptions::default(), 1);
    assert_eq!(deal_from(&table, 100, &[Ten, Ten, Nine, Ace]), Phase::GameOver);

    let state = table.snapshot();
    assert_eq!(state.result, Some(Outcome::Lose));
    assert_eq!(state.chips, 900);
}

#[test]
fn insurance_pays_against_dealer_natural() {
    use Rank::{Ace, King, Nine, Ten};

    let table = Table::new(GameOptions::default(), 1);
    assert_eq!(
        deal_from(&table, 100, &[Ten, Ace, Nine, King]),
        Phase::InsuranceOffer
    );
    assert!(table.is_insurance_offered());
    assert!(table.available_actions().contains(ActionKind::Insure));

    assert_eq!(table.take_insurance().unwrap(), 50);

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.result, Some(Outcome::Lose));
    assert_eq!(state.insurance_bet, 50);
    // 1000 - 100 - 50, then 150 back from insurance.
    assert_eq!(state.chips, 1000);
    assert!(state.dealer_revealed);
}

#[test]
fn declined_insurance_continues_to_player_turn() {
    use Rank::{Ace, Nine, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Ace, Nine, Seven]);
    table.decline_insurance().unwrap();

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::PlayerTurn);
    assert_eq!(state.insurance_bet, 0);
    assert_eq!(state.message, "Your move");

    table.stand().unwrap();
    let (drawn, settlement) = table.play_dealer().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(settlement.outcome, Outcome::Win);
    assert_eq!(table.chips(), 1100);
}

#[test]
fn lost_insurance_stays_lost() {
    use Rank::{Ace, Nine, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Ace, Nine, Seven]);
    table.take_insurance().unwrap();
    assert_eq!(table.phase(), Phase::PlayerTurn);
    assert_eq!(table.chips(), 850);

    table.stand().unwrap();
    let (_, settlement) = table.play_dealer().unwrap();
    assert_eq!(settlement.returned, 200);
    assert_eq!(settlement.net, 50);
    assert_eq!(table.chips(), 1050);
}

#[test]
fn insurance_not_offered_when_disabled() {
    use Rank::{Ace, Nine, Seven, Ten};

    let table = Table::new(GameOptions::default().with_insurance(false), 1);
    assert_eq!(
        deal_from(&table, 100, &[Ten, Ace, Nine, Seven]),
        Phase::PlayerTurn
    );
    assert_eq!(
        table.take_insurance().unwrap_err(),
        InsuranceError::NotOffered
    );
}

#[test]
fn insurance_rejects_wrong_state() {
    let table = Table::new(GameOptions::default(), 1);
    assert_eq!(
        table.take_insurance().unwrap_err(),
        InsuranceError::InvalidState
    );
    assert_eq!(
        table.decline_insurance().unwrap_err(),
        InsuranceError::InvalidState
    );
}

#[test]
fn hit_to_bust_settles_immediately() {
    use Rank::{Eight, King, Nine, Six, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Nine, Six, Eight, King]);

    assert_eq!(table.hit().unwrap().rank, King);

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.result, Some(Outcome::Lose));
    assert_eq!(state.chips, 900);
    assert!(state.dealer_revealed);
    assert_eq!(state.dealer_hand.len(), 2);
    assert_eq!(table.hit().unwrap_err(), ActionError::InvalidState);
}

#[test]
fn double_down_takes_one_card_and_doubles_the_bet() {
    use Rank::{Five, Nine, Seven, Six, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Five, Nine, Six, Seven, Ten, Ten]);

    assert_eq!(table.double_down().unwrap().rank, Ten);

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::DealerTurn);
    assert_eq!(state.bet, 200);
    assert_eq!(state.chips, 800);
    assert_eq!(state.player_hand.value().total, 21);

    let (drawn, settlement) = table.play_dealer().unwrap();
    assert_eq!(ranks(&drawn), vec![Ten]);
    assert_eq!(settlement.outcome, Outcome::Win);
    assert_eq!(settlement.returned, 400);
    assert_eq!(table.chips(), 1200);
}

#[test]
fn double_down_rejected_when_total_not_allowed() {
    use Rank::{Five, Nine, Seven, Six};

    let options = GameOptions::default().with_double(DoubleOption::NineOrTen);
    let table = Table::new(options, 1);
    deal_from(&table, 100, &[Five, Nine, Six, Seven]);

    assert_eq!(table.double_down().unwrap_err(), ActionError::CannotDouble);
    assert!(!table.available_actions().contains(ActionKind::Double));
    assert_eq!(table.snapshot().bet, 100);
}

#[test]
fn double_down_rejected_without_funds() {
    use Rank::{Five, Nine, Seven, Six};

    let table = Table::new(GameOptions::default().with_starting_chips(150), 1);
    deal_from(&table, 100, &[Five, Nine, Six, Seven]);

    assert_eq!(
        table.double_down().unwrap_err(),
        ActionError::InsufficientFunds
    );
}

#[test]
fn split_plays_both_hands_in_order() {
    use Rank::{Eight, Seven, Ten, Three};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Eight, Ten, Eight, Seven, Three, Ten, Ten]);
    assert!(table.available_actions().contains(ActionKind::Split));

    table.split().unwrap();
    let state = table.snapshot();
    assert_eq!(state.phase, Phase::Splitting);
    assert_eq!(state.chips, 800);
    assert_eq!(state.active_hand_index, 0);
    let hands = state.split_hands.as_ref().unwrap();
    assert_eq!(hands[0].value().total, 11);
    assert_eq!(hands[1].value().total, 18);
    assert_eq!(state.player_hand, hands[0].cards);

    // Double the 11, which also finishes the first hand.
    assert_eq!(table.split_double().unwrap().rank, Ten);
    let state = table.snapshot();
    assert_eq!(state.active_hand_index, 1);
    assert_eq!(state.chips, 700);
    let hands = state.split_hands.as_ref().unwrap();
    assert_eq!(hands[0].bet, 200);
    assert!(hands[0].stood);
    assert_eq!(state.player_hand, hands[1].cards);

    table.split_stand().unwrap();
    assert_eq!(table.phase(), Phase::DealerTurn);

    let (drawn, settlement) = table.play_dealer().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(settlement.outcome, Outcome::Win);
    assert_eq!(settlement.returned, 600);
    assert_eq!(settlement.net, 300);

    let state = table.snapshot();
    assert_eq!(state.chips, 1300);
    assert_eq!(state.stats.wins, 2);
    let hands = state.split_hands.as_ref().unwrap();
    assert_eq!(hands[0].result, Some(Outcome::Win));
    assert_eq!(hands[1].result, Some(Outcome::Win));
}

#[test]
fn split_aces_take_one_card_and_21_pays_even_money() {
    use Rank::{Ace, King, Nine, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ace, Ten, Ace, Seven, King, Nine]);

    table.split().unwrap();
    assert_eq!(table.phase(), Phase::DealerTurn);

    let (_, settlement) = table.play_dealer().unwrap();
    let state = table.snapshot();
    let hands = state.split_hands.as_ref().unwrap();
    assert!(!hands[0].value().is_blackjack);
    assert_eq!(hands[0].result, Some(Outcome::Win));
    assert_eq!(hands[1].result, Some(Outcome::Win));
    assert_eq!(settlement.returned, 400);
    assert_eq!(state.chips, 1200);
}

#[test]
fn both_split_hands_bust_without_dealer_turn() {
    use Rank::{Eight, Five, King, Nine, Queen, Six, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Nine, Queen, Eight, Five, Six, King, Queen]);

    table.split().unwrap();
    table.split_hit().unwrap();
    assert_eq!(table.snapshot().active_hand_index, 1);
    table.split_hit().unwrap();

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.result, Some(Outcome::Lose));
    assert_eq!(state.chips, 800);
    assert_eq!(state.stats.losses, 2);
    assert_eq!(state.dealer_hand.len(), 2);
    assert!(state.dealer_revealed);
    assert_eq!(state.message, "Both hands bust");
}

#[test]
fn split_rejected_for_non_pair() {
    use Rank::{Eight, Nine, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Eight, Nine, Seven]);

    assert_eq!(table.split().unwrap_err(), ActionError::CannotSplit);
    assert_eq!(table.split_hit().unwrap_err(), ActionError::InvalidState);
}

#[test]
fn surrender_refunds_half_bet() {
    use Rank::{Seven, Six, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 25, &[Ten, Ten, Six, Seven]);

    assert_eq!(table.surrender().unwrap(), 12);

    let state = table.snapshot();
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.result, Some(Outcome::Lose));
    assert_eq!(state.chips, 987);
    assert_eq!(state.stats.losses, 1);
    assert!(state.dealer_revealed);
}

#[test]
fn surrender_rejected_when_disabled() {
    use Rank::{Seven, Six, Ten};

    let table = Table::new(GameOptions::default().with_surrender(false), 1);
    deal_from(&table, 100, &[Ten, Ten, Six, Seven]);

    assert_eq!(table.surrender().unwrap_err(), ActionError::CannotSurrender);
    assert!(!table.available_actions().contains(ActionKind::Surrender));
}

#[test]
fn bet_errors() {
    let table = Table::new(GameOptions::default().with_starting_chips(100), 1);

    assert_eq!(table.place_bet(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(
        table.place_bet(101).unwrap_err(),
        BetError::InsufficientFunds
    );

    table.place_bet(60).unwrap();
    assert_eq!(
        table.place_bet(41).unwrap_err(),
        BetError::InsufficientFunds
    );
    table.place_bet(40).unwrap();
    assert_eq!(table.snapshot().bet, 100);

    table.deal().unwrap();
    if table.phase().is_in_play() {
        assert_eq!(table.place_bet(10).unwrap_err(), BetError::InvalidState);
    }
}

#[test]
fn deal_errors() {
    use Rank::{Nine, Ten};

    let table = Table::new(GameOptions::default(), 1);
    assert_eq!(table.deal().unwrap_err(), DealError::InvalidState);

    table.place_bet(10).unwrap();
    table.clear_bet().unwrap();
    assert_eq!(table.deal().unwrap_err(), DealError::NoBet);

    table.load_shoe(stacked(&[Ten, Nine, Ten])).unwrap();
    table.place_bet(10).unwrap();
    assert_eq!(table.deal().unwrap_err(), DealError::NotEnoughCards);
    assert_eq!(table.phase(), Phase::Betting);
    assert_eq!(table.chips(), 1000);
}

#[test]
fn lifecycle_errors_during_a_round() {
    use Rank::{Nine, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    deal_from(&table, 100, &[Ten, Seven, Nine, Ten]);

    assert_eq!(table.new_round().unwrap_err(), RoundError::InvalidState);
    assert_eq!(table.reset(None).unwrap_err(), RoundError::InvalidState);
    assert_eq!(table.reshuffle().unwrap_err(), ReshuffleError::InvalidState);
    assert_eq!(table.clear_bet().unwrap_err(), BetError::InvalidState);
}

#[test]
fn dispatch_ignores_illegal_actions() {
    let table = Table::new(GameOptions::default(), 1);
    let before = table.snapshot();

    assert!(!table.dispatch(Action::Stand));
    assert!(!table.dispatch(Action::NewRound));
    assert_eq!(table.snapshot(), before);

    assert!(table.dispatch(Action::PlaceBet { amount: 50 }));
    assert_eq!(table.phase(), Phase::Betting);
}

#[test]
fn available_actions_follow_the_phase() {
    use Rank::{Eight, Seven, Ten};

    let table = Table::new(GameOptions::default(), 1);
    let actions = table.available_actions();
    assert!(actions.contains(ActionKind::PlaceBet));
    assert!(!actions.contains(ActionKind::Deal));

    table.load_shoe(stacked(&[Eight, Ten, Eight, Seven])).unwrap();
    table.place_bet(100).unwrap();
    assert!(table.available_actions().contains(ActionKind::Deal));

    table.deal().unwrap();
    let actions = table.available_actions();
    for kind in [
        ActionKind::Hit,
        ActionKind::Stand,
        ActionKind::Double,
        ActionKind::Split,
        ActionKind::Surrender,
    ] {
        assert!(actions.contains(kind), "{kind:?} should be available");
    }
    assert!(!actions.contains(ActionKind::Insure));
    assert!(!actions.contains(ActionKind::Resolve));
}

#[test]
fn shoe_persists_across_rounds_and_resets_with_the_session() {
    let table = Table::new(GameOptions::default(), 7);
    assert!(table.needs_reshuffle());

    table.place_bet(10).unwrap();
    table.deal().unwrap();
    let state = table.snapshot();
    assert_eq!(state.shoe_size, 312);
    assert_eq!(table.cards_remaining(), 308);

    loop {
        match table.phase() {
            Phase::InsuranceOffer => table.decline_insurance().unwrap(),
            Phase::PlayerTurn => table.stand().unwrap(),
            Phase::DealerTurn => {
                table.play_dealer().unwrap();
            }
            _ => break,
        }
    }
    let remaining = table.cards_remaining();

    table.new_round().unwrap();
    let state = table.snapshot();
    assert_eq!(state.shoe_size, 312);
    assert_eq!(table.cards_remaining(), remaining);
    assert!(!table.needs_reshuffle());

    table.reset(Some(500)).unwrap();
    let state = table.snapshot();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.shoe_size, 0);
    assert_eq!(state.chips, 500);
    assert_eq!(state.stats.hands(), 0);
    assert_eq!(table.cards_remaining(), 0);
}

#[test]
fn cut_card_crossed_mid_round_forces_a_fresh_shoe() {
    use Rank::{Nine, Seven, Ten, Three, Two};

    // A 20-card shoe cut at half: the cut card falls once fewer than 10 remain.
    let options = GameOptions::default().with_decks(1).with_penetration(0.5);
    let table = Table::new(options, 5);

    let mut draws = vec![Ten, Seven, Nine, Ten, Two, Ten, Three, Seven, Two, Two, Two];
    draws.resize(20, Two);
    assert_eq!(deal_from(&table, 10, &draws), Phase::PlayerTurn);
    assert_eq!(table.snapshot().shoe_size, 20);
    table.stand().unwrap();
    table.play_dealer().unwrap();
    table.new_round().unwrap();

    // Second round comes from the same shoe.
    table.place_bet(10).unwrap();
    assert_eq!(table.deal().unwrap(), Phase::PlayerTurn);
    assert_eq!(table.cards_remaining(), 12);
    assert!(!table.snapshot().cut_card_reached);

    table.hit().unwrap();
    table.hit().unwrap();
    assert_eq!(table.cards_remaining(), 10);
    assert!(!table.snapshot().cut_card_reached);

    table.hit().unwrap();
    assert_eq!(table.cards_remaining(), 9);
    assert!(table.snapshot().cut_card_reached);

    table.stand().unwrap();
    table.play_dealer().unwrap();
    table.new_round().unwrap();
    assert!(table.needs_reshuffle());

    table.place_bet(10).unwrap();
    table.deal().unwrap();
    let state = table.snapshot();
    assert_eq!(state.shoe_size, 52);
    assert_eq!(table.cards_remaining(), state.shoe_size - 4);
    assert!(!state.cut_card_reached);
}

#[test]
fn reshuffle_queues_a_fresh_shoe_for_the_next_deal() {
    let options = GameOptions::default().with_decks(1);
    let table = Table::new(options, 3);

    table.reshuffle().unwrap();
    assert!(table.needs_reshuffle());

    table.place_bet(10).unwrap();
    table.deal().unwrap();
    assert_eq!(table.snapshot().shoe_size, 52);
    assert_eq!(table.cards_remaining(), 48);
}

#[test]
fn same_seed_deals_the_same_cards() {
    let first = Table::new(GameOptions::default(), 42);
    let second = Table::new(GameOptions::default(), 42);

    for table in [&first, &second] {
        table.place_bet(10).unwrap();
        table.deal().unwrap();
    }

    let (a, b) = (first.snapshot(), second.snapshot());
    assert_eq!(a.player_hand, b.player_hand);
    assert_eq!(a.dealer_hand, b.dealer_hand);
}

//! End-to-end runs of a player and strategy through the game loop.

#[cfg(test)]
mod tests {
    use crate::mocks::ScriptedRoller;
    use crate::{resolve, DiceRoller, Error, Game, Player, Strategy};
    use craps_types::Decimal;

    fn run_script(
        strategy: &dyn Strategy,
        bankroll: i64,
        totals: &[u8],
        max_rolls: u64,
    ) -> (Result<u64, Error>, Player) {
        let mut game = Game::new();
        let mut player = Player::new(0, Decimal::from_int(bankroll));
        let mut roller = ScriptedRoller::from_totals(totals);
        let result = game.run(&mut roller, &mut player, strategy, max_rolls);
        (result, player)
    }

    fn net(player: &Player, bankroll: i64) -> Decimal {
        player.bankroll() - Decimal::from_int(bankroll)
    }

    #[test]
    fn test_passline_natural() {
        let passline = resolve("passline").unwrap();
        let (result, player) = run_script(passline.as_ref(), 100, &[7], 1);
        assert_eq!(result, Ok(1));
        assert_eq!(net(&player, 100), Decimal::from_int(5));
        assert_eq!(player.stats().wins, 1);
    }

    #[test]
    fn test_passline_craps() {
        let passline = resolve("passline").unwrap();
        let (result, player) = run_script(passline.as_ref(), 100, &[2], 1);
        assert_eq!(result, Ok(1));
        assert_eq!(net(&player, 100), Decimal::from_int(-5));
        assert_eq!(player.stats().losses, 1);
    }

    #[test]
    fn test_passline_point_made_past_budget() {
        let passline = resolve("passline").unwrap();
        let (result, player) = run_script(passline.as_ref(), 100, &[5, 5], 1);
        assert_eq!(result, Ok(2));
        assert_eq!(net(&player, 100), Decimal::from_int(5));
        assert_eq!(player.stats().bet_count, 1);
        assert!(player.bets().is_empty());
    }

    #[test]
    fn test_place_six_eight_session() {
        let place68 = resolve("place68").unwrap();
        // Point 6, the 8 hits, then the 6 is made with the 8 re-placed.
        let (result, player) = run_script(place68.as_ref(), 100, &[6, 8, 6], 3);
        assert_eq!(result, Ok(3));
        assert_eq!(player.stats().wins, 2);
        assert_eq!(player.stats().bet_count, 3);
        assert_eq!(player.stats().total_wagered, Decimal::from_int(18));
        // The re-placed 8 is still working when the run stops
        assert_eq!(player.bets().len(), 1);
        assert_eq!(net(&player, 100), Decimal::from_int(8));
    }

    #[test]
    fn test_buy_four_ten_session() {
        let buy410 = resolve("buy410").unwrap();
        // Point 5, the 4 hits at 2:1, rebuy the 4, seven out.
        let (result, player) = run_script(buy410.as_ref(), 100, &[5, 4, 7], 1);
        assert_eq!(result, Ok(3));
        assert_eq!(player.stats().wins, 1);
        assert_eq!(player.stats().losses, 2);
        assert_eq!(player.stats().commission_paid, Decimal::from_int(3));
        assert!(player.bets().is_empty());
        assert_eq!(net(&player, 100), Decimal::from_int(-3));
    }

    #[test]
    fn test_passline_busts() {
        let passline = resolve("passline").unwrap();
        let (result, player) = run_script(passline.as_ref(), 5, &[2, 7], 5);
        assert_eq!(
            result,
            Err(Error::InsufficientFunds {
                required: Decimal::from_int(5),
                available: Decimal::ZERO,
            })
        );
        assert_eq!(player.bankroll(), Decimal::ZERO);
        // Sampled after the losing 2 settled
        assert_eq!(player.stats().bankroll_min, Decimal::ZERO);
        assert_eq!(player.stats().bankroll_max, Decimal::from_int(5));
    }

    #[test]
    fn test_seeded_session_is_reproducible() {
        let passline = resolve("passline").unwrap();
        let play = || {
            let mut game = Game::new();
            let mut player = Player::new(0, Decimal::from_int(440));
            let mut roller = DiceRoller::new(9_671_111);
            let rolls = game
                .run(&mut roller, &mut player, passline.as_ref(), 240)
                .unwrap();
            (rolls, player.bankroll(), game.stats().clone())
        };
        let first = play();
        assert!(first.0 >= 240);
        assert_eq!(first, play());
    }
}

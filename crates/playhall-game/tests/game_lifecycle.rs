//! Integration tests for the game lifecycle against the public API.

use std::sync::Arc;

use playhall_game::{
    Game, GameCoordinator, GameError, GamePhase, GameStore, GameTeam, LeaveOutcome,
    MemoryGameStore, NewGame, NewTeam,
};
use playhall_protocol::{GameId, GameResult, Includes, ManualClock, PlayerId, StoreError, Timestamp};

const HOST: PlayerId = PlayerId(10);
const OTHER: PlayerId = PlayerId(20);

fn setup() -> (GameCoordinator<MemoryGameStore>, ManualClock) {
    let clock = ManualClock::new();
    (
        GameCoordinator::new(MemoryGameStore::new(), Arc::new(clock.clone())),
        clock,
    )
}

// =========================================================================
// Full lifecycle
// =========================================================================

#[test]
fn test_create_join_leave_scenario() {
    let (mut games, clock) = setup();

    games.create_game("g1", HOST).unwrap();
    assert!(matches!(
        games.create_game("g1", OTHER),
        Err(GameError::AlreadyExists)
    ));

    let joined = games.join_game("g1", OTHER).unwrap();
    assert_eq!(joined.teams.len(), 2);
    assert_eq!(joined.phase(), GamePhase::InProgress);

    clock.advance_secs(120);
    assert_eq!(games.leave_game("g1", OTHER).unwrap(), LeaveOutcome::Left);
    let still = games.active_game("g1").unwrap().unwrap();
    assert!(still.game.is_active());
    assert!(!still.teams[1].is_standing());

    clock.advance_secs(30);
    assert_eq!(games.leave_game("g1", HOST).unwrap(), LeaveOutcome::GameEnded);
    assert!(games.active_game("g1").unwrap().is_none());

    let views = games.game_details(&Includes::all()).unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].duration, Some(150));
    let teams = views[0].teams_details.as_ref().unwrap();
    assert_eq!(teams[0].result, Some(GameResult::Victory));
    assert_eq!(teams[1].result, Some(GameResult::Defeat));
}

#[test]
fn test_leave_with_one_team_already_out_ends_without_touching_other() {
    let (mut games, _clock) = setup();
    games.create_game("g1", HOST).unwrap();
    games.join_game("g1", OTHER).unwrap();
    games.join_game("g1", PlayerId(30)).unwrap();
    games.leave_game("g1", PlayerId(30)).unwrap();
    games.leave_game("g1", OTHER).unwrap();

    let before = games.active_game("g1").unwrap().unwrap();
    games.leave_game("g1", HOST).unwrap();

    let after = &games.all_games().unwrap()[0];
    assert!(after.game.end_time.is_some());
    assert_eq!(after.teams, before.teams);
}

#[test]
fn test_separate_names_are_independent() {
    let (mut games, _clock) = setup();
    games.create_game("red", HOST).unwrap();
    games.create_game("blue", OTHER).unwrap();

    games.join_game("red", OTHER).unwrap();
    games.leave_game("blue", OTHER).unwrap();

    assert!(games.active_game("red").unwrap().is_some());
    assert!(games.active_game("blue").unwrap().is_none());
    assert_eq!(games.active_game("red").unwrap().unwrap().teams.len(), 2);
}

// =========================================================================
// Store faults
// =========================================================================

fn unavailable() -> StoreError {
    StoreError::Unavailable("read-only".into())
}

/// A store whose writes always fail.
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryGameStore,
}

impl GameStore for ReadOnlyStore {
    fn find_active_by_name(&self, name: &str) -> Result<Option<GameId>, StoreError> {
        self.inner.find_active_by_name(name)
    }

    fn find_game(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        self.inner.find_game(id)
    }

    fn find_all_games(&self) -> Result<Vec<Game>, StoreError> {
        self.inner.find_all_games()
    }

    fn teams_of(&self, game_id: GameId) -> Result<Vec<GameTeam>, StoreError> {
        self.inner.teams_of(game_id)
    }

    fn insert_game(&mut self, _game: NewGame) -> Result<(Game, GameTeam), StoreError> {
        Err(unavailable())
    }

    fn end_game(&mut self, _id: GameId, _end_time: Timestamp) -> Result<Game, StoreError> {
        Err(unavailable())
    }

    fn insert_team(&mut self, _team: NewTeam) -> Result<GameTeam, StoreError> {
        Err(unavailable())
    }

    fn save_team(&mut self, _team: &GameTeam) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

#[test]
fn test_store_fault_propagates_not_rejected() {
    let mut games = GameCoordinator::new(ReadOnlyStore::default(), Arc::new(ManualClock::new()));

    let err = games.create_game("g1", HOST).unwrap_err();

    assert!(matches!(err, GameError::Store(StoreError::Unavailable(_))));
    assert!(err.into_rejection().is_err());
}

#[test]
fn test_create_game_store_fault_leaves_no_game_behind() {
    let mut games = GameCoordinator::new(ReadOnlyStore::default(), Arc::new(ManualClock::new()));

    assert!(games.create_game("g1", HOST).is_err());

    assert!(games.all_games().unwrap().is_empty());
    assert!(games.game_details(&Includes::all()).unwrap().is_empty());
    assert!(games.active_game("g1").unwrap().is_none());
}

/// A store that works normally until `fail_writes` is set.
#[derive(Default)]
struct SwitchableStore {
    inner: MemoryGameStore,
    fail_writes: bool,
}

impl SwitchableStore {
    fn check(&self) -> Result<(), StoreError> {
        if self.fail_writes { Err(unavailable()) } else { Ok(()) }
    }
}

impl GameStore for SwitchableStore {
    fn find_active_by_name(&self, name: &str) -> Result<Option<GameId>, StoreError> {
        self.inner.find_active_by_name(name)
    }

    fn find_game(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        self.inner.find_game(id)
    }

    fn find_all_games(&self) -> Result<Vec<Game>, StoreError> {
        self.inner.find_all_games()
    }

    fn teams_of(&self, game_id: GameId) -> Result<Vec<GameTeam>, StoreError> {
        self.inner.teams_of(game_id)
    }

    fn insert_game(&mut self, game: NewGame) -> Result<(Game, GameTeam), StoreError> {
        self.check()?;
        self.inner.insert_game(game)
    }

    fn end_game(&mut self, id: GameId, end_time: Timestamp) -> Result<Game, StoreError> {
        self.check()?;
        self.inner.end_game(id, end_time)
    }

    fn insert_team(&mut self, team: NewTeam) -> Result<GameTeam, StoreError> {
        self.check()?;
        self.inner.insert_team(team)
    }

    fn save_team(&mut self, team: &GameTeam) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save_team(team)
    }
}

fn switchable() -> GameCoordinator<SwitchableStore> {
    GameCoordinator::new(SwitchableStore::default(), Arc::new(ManualClock::new()))
}

#[test]
fn test_leave_game_failed_end_keeps_game_running() {
    let mut games = switchable();
    games.create_game("g1", HOST).unwrap();

    games.store_mut().fail_writes = true;
    let err = games.leave_game("g1", HOST).unwrap_err();
    assert!(matches!(err, GameError::Store(StoreError::Unavailable(_))));

    games.store_mut().fail_writes = false;
    let still = games.active_game("g1").unwrap().unwrap();
    assert!(still.game.is_active());
    assert!(still.teams[0].has_remaining(HOST));

    // The game carries on as if the leave never happened.
    games.join_game("g1", OTHER).unwrap();
    assert!(matches!(
        games.create_game("g1", OTHER),
        Err(GameError::AlreadyExists)
    ));
    assert_eq!(games.leave_game("g1", OTHER).unwrap(), LeaveOutcome::Left);
    assert_eq!(games.leave_game("g1", HOST).unwrap(), LeaveOutcome::GameEnded);
    games.create_game("g1", OTHER).unwrap();
}

/// A store whose name index forgets to drop ended games.
#[derive(Default)]
struct StaleIndexStore {
    inner: MemoryGameStore,
    stale: Vec<(String, GameId)>,
}

impl GameStore for StaleIndexStore {
    fn find_active_by_name(&self, name: &str) -> Result<Option<GameId>, StoreError> {
        if let Some(id) = self.inner.find_active_by_name(name)? {
            return Ok(Some(id));
        }
        Ok(self
            .stale
            .iter()
            .find(|(stale_name, _)| stale_name == name)
            .map(|(_, id)| *id))
    }

    fn find_game(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        self.inner.find_game(id)
    }

    fn find_all_games(&self) -> Result<Vec<Game>, StoreError> {
        self.inner.find_all_games()
    }

    fn teams_of(&self, game_id: GameId) -> Result<Vec<GameTeam>, StoreError> {
        self.inner.teams_of(game_id)
    }

    fn insert_game(&mut self, game: NewGame) -> Result<(Game, GameTeam), StoreError> {
        self.inner.insert_game(game)
    }

    fn end_game(&mut self, id: GameId, end_time: Timestamp) -> Result<Game, StoreError> {
        let game = self.inner.end_game(id, end_time)?;
        self.stale.push((game.name.clone(), id));
        Ok(game)
    }

    fn insert_team(&mut self, team: NewTeam) -> Result<GameTeam, StoreError> {
        self.inner.insert_team(team)
    }

    fn save_team(&mut self, team: &GameTeam) -> Result<(), StoreError> {
        self.inner.save_team(team)
    }
}

#[test]
fn test_active_game_ignores_index_entry_for_ended_game() {
    let mut games = GameCoordinator::new(StaleIndexStore::default(), Arc::new(ManualClock::new()));
    games.create_game("g1", HOST).unwrap();
    assert_eq!(games.leave_game("g1", HOST).unwrap(), LeaveOutcome::GameEnded);

    assert!(games.active_game("g1").unwrap().is_none());
    assert!(matches!(games.join_game("g1", OTHER), Err(GameError::NotFound)));
    assert!(matches!(games.leave_game("g1", HOST), Err(GameError::NotFound)));

    let replay = games.create_game("g1", OTHER).unwrap();
    assert_eq!(games.active_game("g1").unwrap().unwrap().game.id, replay.game.id);
    assert_eq!(games.all_games().unwrap()[0].teams.len(), 1);
}

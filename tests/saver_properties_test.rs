//! Behavioral properties of individual screensavers, checked through the
//! public `Simulation` surface.

use pretty_assertions::assert_eq;

use term_savers::core::savers::bouncing_logo::{self, Bouncer, BouncingLogo, LOGO};
use term_savers::core::savers::fire::{Fire, SEED_MAX, SEED_MIN};
use term_savers::core::savers::game_of_life::{GameOfLife, LifeBoard, PERTURB_COOLDOWN};
use term_savers::core::{SimRng, Simulation};
use term_savers::types::{CellStyle, Grid, Tick};

#[test]
fn logo_reverses_and_recolors_at_the_right_edge() {
    let mut sim = BouncingLogo::new();
    sim.place(Bouncer {
        x: 17,
        y: 2,
        dx: 1,
        dy: 1,
        color: 0,
    });
    let mut rng = SimRng::new(1);
    let grid = sim.render(Tick::new(40, 10, 0, 0), &mut rng);

    // 40 - 22 = 18 is the last column where the block fits.
    assert_eq!(
        sim.bouncer(),
        Some(Bouncer {
            x: 18,
            y: 3,
            dx: -1,
            dy: 1,
            color: 1,
        })
    );
    let style = CellStyle::fg(bouncing_logo::COLORS[1]).bold();
    assert_eq!(grid.get(18, 3).map(|c| (c.ch, c.style)), Some(('╔', style)));
    assert_eq!(grid.get(39, 6).map(|c| c.ch), Some('╝'));
    assert_eq!(grid.row_text(4).trim_end(), format!("{}{}", " ".repeat(18), LOGO[1]));

    // Next tick moves left without another color change.
    sim.advance(Tick::new(40, 10, 1, 66), &mut rng, &mut Grid::default());
    let b = sim.bouncer().unwrap();
    assert_eq!((b.x, b.color), (17, 1));
}

#[test]
fn logo_corner_hit_changes_color_once() {
    let mut sim = BouncingLogo::new();
    sim.place(Bouncer {
        x: 1,
        y: 1,
        dx: -1,
        dy: -1,
        color: 7,
    });
    sim.render(Tick::new(40, 10, 0, 0), &mut SimRng::new(1));
    assert_eq!(
        sim.bouncer(),
        Some(Bouncer {
            x: 0,
            y: 0,
            dx: 1,
            dy: 1,
            color: 0,
        })
    );
}

#[test]
fn fire_first_tick_only_heats_the_bottom_row() {
    let mut sim = Fire::new();
    let mut rng = SimRng::new(3);
    let grid = sim.render(Tick::new(30, 12, 0, 0), &mut rng);
    let field = sim.field().unwrap();
    assert_eq!((field.width(), field.height()), (30, 11));

    for x in 0..30 {
        let heat = field.get(x, 10);
        assert!((SEED_MIN as f32..=SEED_MAX as f32).contains(&heat));
        for y in 0..10 {
            assert_eq!(field.get(x, y), 0.0);
        }
    }
    // Only the seeded row is visible; the reserved row stays blank.
    assert_eq!(grid.filled(), 30);
    assert!(grid.row_text(11).trim().is_empty());
}

#[test]
fn fire_heat_rises_one_row_per_tick() {
    let mut sim = Fire::new();
    let mut rng = SimRng::new(5);
    let tick = Tick::new(30, 12, 0, 0);
    let mut grid = Grid::default();
    sim.advance(tick, &mut rng, &mut grid);
    sim.advance(tick.with_frame(1), &mut rng, &mut grid);
    let field = sim.field().unwrap();

    for x in 0..30 {
        // Edge columns see two heated neighbors below instead of three.
        let floor = if x == 0 || x == 29 { 97.0 } else { 147.0 };
        let just_above = field.get(x, 9);
        assert!((floor..=190.25).contains(&just_above), "x={x}: {just_above}");

        // Two rows up only reached the seed row through the y + 2 tap.
        let two_up = field.get(x, 8);
        assert!((47.0..=62.75).contains(&two_up), "x={x}: {two_up}");

        for y in 0..8 {
            assert_eq!(field.get(x, y), 0.0);
        }
    }
}

#[test]
fn life_generations_are_a_pure_function_of_the_board() {
    let mut rng = SimRng::new(21);
    let mut a = LifeBoard::random(40, 20, 0.3, &mut rng);
    let mut b = a.clone();
    for _ in 0..25 {
        assert_eq!(a.step(), b.step());
        assert_eq!(a, b);
    }
}

#[test]
fn empty_life_board_is_perturbed_after_ten_flat_generations() {
    let mut sim = GameOfLife::with_board(LifeBoard::new(80, 23));
    let mut rng = SimRng::new(4);
    let mut grid = Grid::default();
    let tick = Tick::new(80, 24, 0, 0);

    for frame in 0..9 {
        sim.advance(tick.with_frame(frame), &mut rng, &mut grid);
        assert_eq!(sim.last_perturb(), None);
    }
    sim.advance(tick.with_frame(9), &mut rng, &mut grid);
    assert_eq!(sim.last_perturb(), Some(9));

    // About 5% of 1840 cells are re-rolled with a coin flip.
    let population = sim.board().unwrap().population();
    assert!((10..=120).contains(&population), "population {population}");
    assert_eq!(grid.filled(), population);
}

#[test]
fn life_perturbations_respect_the_cooldown() {
    let mut sim = GameOfLife::with_board(LifeBoard::new(40, 20));
    let mut rng = SimRng::new(12);
    let mut grid = Grid::default();
    let tick = Tick::new(40, 21, 0, 0);

    let mut fired = Vec::new();
    for frame in 0..400 {
        sim.advance(tick.with_frame(frame), &mut rng, &mut grid);
        if sim.last_perturb() == Some(frame) {
            fired.push(frame);
        }
    }
    assert_eq!(fired.first(), Some(&9));
    for pair in fired.windows(2) {
        assert!(pair[1] - pair[0] >= PERTURB_COOLDOWN);
    }
}

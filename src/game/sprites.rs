//! Sprite geometry, movement and collision. Pure state only; drawing lives in
//! the game module so these types stay host-testable.

pub const CANVAS_W: f64 = 900.0;
pub const CANVAS_H: f64 = 550.0;

pub const PLAYER_W: f64 = 100.0;
pub const PLAYER_H: f64 = 65.0;
pub const PLAYER_SPEED: f64 = 18.0;
pub const BULLET_R: f64 = 12.0;
pub const BULLET_SPEED: f64 = 15.0;
pub const OPTION_W: f64 = 150.0;
pub const OPTION_H: f64 = 60.0;
const OPTION_GRAVITY: f64 = 0.5;

/// The player's ship at the bottom of the screen.
pub struct Player {
    pub x: f64,
    pub y: f64,
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: CANVAS_W / 2.0 - PLAYER_W / 2.0,
            y: CANVAS_H - 100.0,
        }
    }

    /// One frame of horizontal movement, clamped to the canvas.
    pub fn step(&mut self, left_held: bool, right_held: bool) {
        if left_held {
            self.x = (self.x - PLAYER_SPEED).max(0.0);
        }
        if right_held {
            self.x = (self.x + PLAYER_SPEED).min(CANVAS_W - PLAYER_W);
        }
    }

    pub fn muzzle_x(&self) -> f64 {
        self.x + PLAYER_W / 2.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A projectile travelling straight up.
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

impl Bullet {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, active: true }
    }

    pub fn step(&mut self) {
        self.y -= BULLET_SPEED;
        if self.y < 0.0 {
            self.active = false;
        }
    }
}

/// One on-screen word box.
pub struct OptionBox {
    pub word: String,
    pub is_target: bool,
    pub x: f64,
    pub y: f64,
    pub hit: bool,
    /// Timestamp of the last hit; drives the target un-hit delay.
    pub hit_at: f64,
    pub falling: bool,
    pub fall_speed: f64,
}

impl OptionBox {
    pub fn new(word: String, is_target: bool, x: f64, y: f64) -> Self {
        Self {
            word,
            is_target,
            x,
            y,
            hit: false,
            hit_at: 0.0,
            falling: false,
            fall_speed: 0.0,
        }
    }

    /// Per-frame update: shot-down boxes fall with gravity; a mistakenly shot
    /// target flashes for half a second and then becomes shootable again.
    pub fn step(&mut self, now: f64) {
        if self.falling {
            self.y += self.fall_speed;
            self.fall_speed += OPTION_GRAVITY;
        }
        if self.hit && self.is_target && now - self.hit_at > 500.0 {
            self.hit = false;
        }
    }

    /// Circle-vs-center test, radius = half the box width plus the bullet
    /// radius. Generous on purpose; the word is the hitbox.
    pub fn hits(&self, bullet: &Bullet) -> bool {
        let cx = self.x + OPTION_W / 2.0;
        let cy = self.y + OPTION_H / 2.0;
        let d = ((bullet.x - cx).powi(2) + (bullet.y - cy).powi(2)).sqrt();
        d < OPTION_W / 2.0 + BULLET_R
    }

    pub fn offscreen(&self) -> bool {
        self.falling && self.y > CANVAS_H
    }
}

/// Evenly spread `count` option boxes across the canvas width, 20 px margins,
/// at least 10 px spacing (boxes may overflow for very long rows, matching
/// the spacing floor). Returns the x position of each box.
pub fn layout_positions(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let margin = 20.0;
    let n = count as f64;
    let spacing = if count > 1 {
        ((CANVAS_W - 2.0 * margin - n * OPTION_W) / (n - 1.0)).max(10.0)
    } else {
        0.0
    };
    let start_x = (CANVAS_W - (n * OPTION_W + (n - 1.0) * spacing)) / 2.0;
    (0..count)
        .map(|i| start_x + i as f64 * (OPTION_W + spacing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_clamps_to_canvas_edges() {
        let mut p = Player::new();
        for _ in 0..200 {
            p.step(true, false);
        }
        assert_eq!(p.x, 0.0);
        for _ in 0..200 {
            p.step(false, true);
        }
        assert_eq!(p.x, CANVAS_W - PLAYER_W);
    }

    #[test]
    fn bullet_deactivates_above_the_canvas() {
        let mut b = Bullet::new(100.0, BULLET_SPEED + 1.0);
        b.step();
        assert!(b.active);
        b.step();
        assert!(!b.active);
    }

    #[test]
    fn collision_uses_center_distance() {
        let opt = OptionBox::new("word".into(), false, 100.0, 100.0);
        let center = Bullet::new(100.0 + OPTION_W / 2.0, 100.0 + OPTION_H / 2.0);
        assert!(opt.hits(&center));
        let outside = Bullet::new(100.0 + OPTION_W / 2.0 + OPTION_W, 100.0 + OPTION_H / 2.0);
        assert!(!opt.hits(&outside));
        // Just inside the combined radius on the x axis.
        let grazing = Bullet::new(
            100.0 + OPTION_W / 2.0 + OPTION_W / 2.0 + BULLET_R - 1.0,
            100.0 + OPTION_H / 2.0,
        );
        assert!(opt.hits(&grazing));
    }

    #[test]
    fn falling_option_accelerates_and_leaves_the_canvas() {
        let mut opt = OptionBox::new("word".into(), false, 0.0, CANVAS_H - 10.0);
        opt.falling = true;
        opt.fall_speed = 2.0;
        let mut frames = 0;
        while !opt.offscreen() && frames < 100 {
            opt.step(0.0);
            frames += 1;
        }
        assert!(opt.offscreen());
        assert!(opt.fall_speed > 2.0);
    }

    #[test]
    fn mistaken_target_unhits_after_half_a_second() {
        let mut opt = OptionBox::new("word".into(), true, 0.0, 0.0);
        opt.hit = true;
        opt.hit_at = 1_000.0;
        opt.step(1_400.0);
        assert!(opt.hit);
        opt.step(1_600.0);
        assert!(!opt.hit);
    }

    #[test]
    fn layout_stays_ordered_with_minimum_spacing() {
        for count in 1..=8 {
            let xs = layout_positions(count);
            assert_eq!(xs.len(), count);
            for pair in xs.windows(2) {
                assert!(pair[1] - pair[0] >= OPTION_W + 10.0 - 1e-9);
            }
        }
        // Few options fit inside the canvas with margins.
        let xs = layout_positions(4);
        assert!(xs[0] >= 20.0 - 1e-9);
        assert!(xs[3] + OPTION_W <= CANVAS_W - 20.0 + 1e-9);
    }

    #[test]
    fn layout_centers_a_single_option() {
        let xs = layout_positions(1);
        assert!((xs[0] - (CANVAS_W - OPTION_W) / 2.0).abs() < 1e-9);
    }
}

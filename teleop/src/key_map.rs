use std::fmt;

/// Help text shown to the operator.
pub const HELP: &str = "
Reading from the keyboard and Publishing to Twist!
---------------------------
Moving around:
   u    i    o
   j    k    l
   m    ,    .

For Holonomic mode (strafing), hold down the shift key:
---------------------------
   U    I    O
   J    K    L
   M    <    >

t : up (+z)
b : down (-z)

1 : store pose 1    ! : navigate to stored pose 1
2 : store pose 2    @ : navigate to stored pose 2
3 : store pose 3    # : navigate to stored pose 3

H : Return Home
Tab : clear costmaps
Enter : cancel current goal

q/z : increase/decrease max speeds by 10%
w/x : increase/decrease only linear speed by 10%
e/c : increase/decrease only angular speed by 10%

anything else : stop

CTRL-C to quit
";

/// Line echoed to the operator whenever `speed` or `turn` changes.
pub fn velocities_line(speed: f64, turn: f64) -> String {
    format!("currently:\tspeed {speed}\tturn {turn} ")
}

/// Unit motion direction. Each component is -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MotionVector {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub th: i8,
}

impl MotionVector {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: i8, y: i8, z: i8, th: i8) -> Self {
        Self { x, y, z, th }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Multiplicative factors applied to `speed` and `turn`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedFactors {
    pub speed: f64,
    pub turn: f64,
}

impl SpeedFactors {
    pub const fn new(speed: f64, turn: f64) -> Self {
        Self { speed, turn }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseSlot {
    One,
    Two,
    Three,
}

impl PoseSlot {
    pub const ALL: [PoseSlot; 3] = [PoseSlot::One, PoseSlot::Two, PoseSlot::Three];

    /// Zero-based index of the slot.
    pub fn index(self) -> usize {
        match self {
            PoseSlot::One => 0,
            PoseSlot::Two => 1,
            PoseSlot::Three => 2,
        }
    }

    /// Number shown to the operator (1 to 3).
    pub fn number(self) -> usize {
        self.index() + 1
    }
}

impl fmt::Display for PoseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pose {}", self.number())
    }
}

/// What the operator asked for with a single keystroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Move(MotionVector),
    ScaleSpeed(SpeedFactors),
    StorePose(PoseSlot),
    RecallPose(PoseSlot),
    GoHome,
    ClearCostmaps,
    CancelGoal,
    /// Ctrl-C: leave the input loop.
    Interrupt,
    /// No key, or a key without a binding. Stops motion.
    Unknown,
}

#[rustfmt::skip]
pub const MOVE_BINDINGS: &[(char, MotionVector)] = &[
    ('i', MotionVector::new( 1,  0,  0,  0)),
    ('o', MotionVector::new( 1,  0,  0, -1)),
    ('j', MotionVector::new( 0,  0,  0,  1)),
    ('l', MotionVector::new( 0,  0,  0, -1)),
    ('u', MotionVector::new( 1,  0,  0,  1)),
    (',', MotionVector::new(-1,  0,  0,  0)),
    ('.', MotionVector::new(-1,  0,  0,  1)),
    ('m', MotionVector::new(-1,  0,  0, -1)),
    ('O', MotionVector::new( 1, -1,  0,  0)),
    ('I', MotionVector::new( 1,  0,  0,  0)),
    ('J', MotionVector::new( 0,  1,  0,  0)),
    ('L', MotionVector::new( 0, -1,  0,  0)),
    ('U', MotionVector::new( 1,  1,  0,  0)),
    ('<', MotionVector::new(-1,  0,  0,  0)),
    ('>', MotionVector::new(-1, -1,  0,  0)),
    ('M', MotionVector::new(-1,  1,  0,  0)),
    ('t', MotionVector::new( 0,  0,  1,  0)),
    ('b', MotionVector::new( 0,  0, -1,  0)),
];

#[rustfmt::skip]
pub const SPEED_BINDINGS: &[(char, SpeedFactors)] = &[
    ('q', SpeedFactors::new(1.1, 1.1)),
    ('z', SpeedFactors::new(0.9, 0.9)),
    ('w', SpeedFactors::new(1.1, 1.0)),
    ('x', SpeedFactors::new(0.9, 1.0)),
    ('e', SpeedFactors::new(1.0, 1.1)),
    ('c', SpeedFactors::new(1.0, 0.9)),
];

const CTRL_C: char = '\x03';

/// Maps a keystroke to an [`Intent`].
///
/// `None` means that no key arrived within the key timeout and maps to
/// [`Intent::Unknown`], as does every key without a binding.
pub fn key_to_intent(key: Option<char>) -> Intent {
    let Some(key) = key else {
        return Intent::Unknown;
    };
    if let Some((_, motion)) = MOVE_BINDINGS.iter().find(|(k, _)| *k == key) {
        return Intent::Move(*motion);
    }
    if let Some((_, factors)) = SPEED_BINDINGS.iter().find(|(k, _)| *k == key) {
        return Intent::ScaleSpeed(*factors);
    }
    match key {
        '1' => Intent::StorePose(PoseSlot::One),
        '2' => Intent::StorePose(PoseSlot::Two),
        '3' => Intent::StorePose(PoseSlot::Three),
        '!' => Intent::RecallPose(PoseSlot::One),
        '@' => Intent::RecallPose(PoseSlot::Two),
        '#' => Intent::RecallPose(PoseSlot::Three),
        'H' => Intent::GoHome,
        '\t' => Intent::ClearCostmaps,
        '\r' => Intent::CancelGoal,
        CTRL_C => Intent::Interrupt,
        _ => Intent::Unknown,
    }
}

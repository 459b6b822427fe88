mod timestamp;

pub use self::timestamp::*;

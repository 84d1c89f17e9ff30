pub mod bracket;
pub mod road;

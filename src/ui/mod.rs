/// UI building blocks
///
/// Pure view code: everything here renders from the analysis board's
/// published state and emits messages, holding no state of its own.

pub mod results;
pub mod upload;

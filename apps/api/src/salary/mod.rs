// Salary estimation engine.
// lookup + experience + estimator are the pure core; report adds the optional
// external wage source, advice/validation/handlers serve the HTTP API.

pub mod advice;
pub mod estimator;
pub mod experience;
pub mod handlers;
pub mod lookup;
pub mod report;
pub mod validation;
pub mod wage_source;

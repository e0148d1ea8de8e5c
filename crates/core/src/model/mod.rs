mod catalog;
pub mod ids;
mod question;
mod result;
mod role;
mod stage;

pub use catalog::{CatalogError, GuideCatalog, GuideStage};
pub use ids::{
    AnswerOptionId, GuideStageId, ParseIdError, QuestionId, RoleId, SessionId, StageId,
};
pub use question::{AnswerOption, Question};
pub use result::{Interpretation, RoleScore, StageRecommendation, StageScore, TestResult};
pub use role::{RoleAttribute, RoleExtras, RoleProfile, display_name_for};
pub use stage::{StageDetail, StageInfo, StageRole, VacancyFilters};

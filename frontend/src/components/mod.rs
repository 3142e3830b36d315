pub mod badges;
pub mod image_viewer;
pub mod model_card;
pub mod review_form;
pub mod sidebar;
pub mod utils;

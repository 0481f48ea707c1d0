//! User-facing reply texts and prompts.

use rcommon::ModelId;

/// Ends the parameter-selection loop; also the label of the extra picker
/// button shown alongside the parameter names.
pub const DONE_SENTINEL: &str = "I'm done";

pub const HELP: &str = "/help - get the list of available commands\n\n\
/get_available_classes - get the list of classes available for training\n\
/get_available_params - get the list of parameters available to set\n\
/get_models_list - get the list of trained models\n\
/train - start the model training dialogue\n\
/retrain <model_id> - start the model retraining dialogue\n\
/delete <model_id> - delete the trained model\n\
/predict <model_id> - start the predicting dialogue\n\
/exit - exit from an active dialogue";

pub const MODEL_CHOICE: &str = "Choose the desired model class";

pub const PARAM_CHOICE: &str =
    "Choose desired parameters. If you had chosen all required parameters, press 'I'm done'";

pub const PARAM_VALUE: &str = "Type the desired parameter value. Use English notation with dot \
for floats. Scientific notation is not supported";

pub const FEATURES_UPLOAD: &str = "Upload the .csv file with features (as retrieved by \
\"pandas.DataFrame.to_csv\"). File size should not exceed 20MB.";

pub const TARGET_UPLOAD: &str = "Upload the .csv file with target (as retrieved by \
\"pandas.Series.to_csv\"). File size should not exceed 20MB.";

pub const INVALID_MODEL_ID: &str =
    "This is not valid model ID. Please choose one from the list of available models.";

pub const API_UNAVAILABLE: &str = "The API is not available right now. Please try again later.";

pub const FILE_TOO_LARGE: &str = "The file is too large.";

pub const NOT_CSV: &str = "The file is not in .csv format. Please try again.";

pub const FETCH_FAILED: &str = "The file could not be downloaded. Please send it again.";

pub const EXIT_ACK: &str =
    "OK. If you want to continue working with the bot, type the corresponding command.";

pub const INVALID_INPUT: &str = "This is invalid command or input. Follow the instructions. \
If you want to leave an active dialogue, type /exit.";

pub const PREDICTION_CAPTION: &str = "Your prediction";

pub fn model_deleted(id: &ModelId) -> String {
    format!("The model {id} was deleted")
}

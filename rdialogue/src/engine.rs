//! The per-kind stage machines behind the router.
//!
//! The engine snapshots the chat's session, classifies the event, performs
//! any backend or transport round-trips without holding the store lock, then
//! commits the resulting transition. Domain failures become chat messages;
//! only transport/store/artifact faults surface as [`DialogueError`].

use std::path::PathBuf;
use std::sync::Arc;

use rcommon::{ChatId, ModelId};
use rgateway::{
    ApiOutcome, ModelBackend, PredictRequest, RetrainRequest, TrainRequest,
};
use rrender::{render_grouped_lists, render_list, render_meta, render_pretty};
use rsession::{DialogueKind, DraftPayload, Session, SessionStore, Stage};
use rtable::{check_size, parse_features, parse_target, series_to_csv, Series};
use serde_json::Value;

use crate::replies::{self, DONE_SENTINEL};
use crate::{
    route, ChatTransport, Command, DialogueError, DialogueHooks, DocumentRef, IncomingEvent,
    NoopDialogueHooks, Route,
};

#[derive(Clone)]
pub struct DialogueEngine {
    store: Arc<SessionStore>,
    backend: Arc<dyn ModelBackend>,
    transport: Arc<dyn ChatTransport>,
    hooks: Arc<dyn DialogueHooks>,
    storage_dir: PathBuf,
}

pub struct DialogueEngineBuilder {
    store: Arc<SessionStore>,
    backend: Arc<dyn ModelBackend>,
    transport: Arc<dyn ChatTransport>,
    hooks: Arc<dyn DialogueHooks>,
    storage_dir: PathBuf,
}

impl DialogueEngineBuilder {
    pub fn store(mut self, store: Arc<SessionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn DialogueHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Where prediction artifacts are materialized before delivery.
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn build(self) -> DialogueEngine {
        DialogueEngine {
            store: self.store,
            backend: self.backend,
            transport: self.transport,
            hooks: self.hooks,
            storage_dir: self.storage_dir,
        }
    }
}

impl DialogueEngine {
    pub fn builder(
        backend: Arc<dyn ModelBackend>,
        transport: Arc<dyn ChatTransport>,
    ) -> DialogueEngineBuilder {
        DialogueEngineBuilder {
            store: Arc::new(SessionStore::new()),
            backend,
            transport,
            hooks: Arc::new(NoopDialogueHooks),
            storage_dir: std::env::temp_dir(),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Processes one chat event end to end.
    pub async fn handle_event(&self, event: IncomingEvent) -> Result<(), DialogueError> {
        let chat = event.chat;
        let session = self.store.get(chat)?;
        let routed = route(session.as_ref(), &event);
        self.hooks.on_event_routed(chat, routed.name());

        match routed {
            Route::Command(command) => self.handle_command(chat, command).await,
            Route::ModelChoice(class) => self.handle_model_choice(chat, class).await,
            Route::ParamsDone => self.handle_params_done(chat).await,
            Route::ParamChoice(name) => self.handle_param_choice(chat, name).await,
            Route::ParamValue(value) => match session {
                Some(session) => self.handle_param_value(chat, &session, value).await,
                None => self.refuse(chat, "invalid_input", replies::INVALID_INPUT).await,
            },
            Route::Upload(document) => match session {
                Some(session) => self.handle_upload(chat, &session, document).await,
                None => self.refuse(chat, "invalid_input", replies::INVALID_INPUT).await,
            },
            Route::Cancel => self.handle_cancel(chat).await,
            Route::Invalid => self.refuse(chat, "invalid_input", replies::INVALID_INPUT).await,
        }
    }

    async fn handle_command(&self, chat: ChatId, command: Command) -> Result<(), DialogueError> {
        match command {
            Command::Start | Command::Help => self.say(chat, replies::HELP).await,
            Command::GetModelsList => self.handle_models_list(chat).await,
            Command::GetAvailableClasses => self.handle_classes_list(chat).await,
            Command::GetAvailableParams => self.handle_params_list(chat).await,
            Command::Train => self.handle_train(chat).await,
            Command::Retrain(id) => {
                self.handle_dialogue_entry(chat, DialogueKind::Retraining, id).await
            }
            Command::Predict(id) => {
                self.handle_dialogue_entry(chat, DialogueKind::Predicting, id).await
            }
            Command::Delete(id) => self.handle_delete(chat, id).await,
            // Nothing to cancel in the standard state; acknowledge anyway.
            Command::Exit => self.handle_cancel(chat).await,
        }
    }

    async fn handle_models_list(&self, chat: ChatId) -> Result<(), DialogueError> {
        match self.backend.list_models().await {
            Ok(ApiOutcome::Success(catalog)) => {
                self.hooks.on_backend_outcome("list_models", "success");
                let value = Value::Object(catalog.into_iter().collect());
                self.say(chat, &render_pretty(&value)).await
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("list_models", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "list_models").await,
        }
    }

    async fn handle_classes_list(&self, chat: ChatId) -> Result<(), DialogueError> {
        match self.backend.list_classes().await {
            Ok(ApiOutcome::Success(classes)) => {
                self.hooks.on_backend_outcome("list_classes", "success");
                self.say(chat, &render_list(&classes)).await
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("list_classes", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "list_classes").await,
        }
    }

    async fn handle_params_list(&self, chat: ChatId) -> Result<(), DialogueError> {
        match self.backend.list_parameters().await {
            Ok(ApiOutcome::Success(parameters)) => {
                self.hooks.on_backend_outcome("list_parameters", "success");
                self.say(chat, &render_grouped_lists(&parameters)).await
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("list_parameters", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "list_parameters").await,
        }
    }

    /// Training entry: the class list becomes the first stage's choices.
    async fn handle_train(&self, chat: ChatId) -> Result<(), DialogueError> {
        match self.backend.list_classes().await {
            Ok(ApiOutcome::Success(classes)) => {
                self.hooks.on_backend_outcome("list_classes", "success");
                self.offer(chat, replies::MODEL_CHOICE, &classes).await?;
                let session = Session::new(DialogueKind::Training, Stage::ModelChoice, classes);
                self.store.create(chat, session)?;
                self.hooks.on_session_created(chat, DialogueKind::Training);
                Ok(())
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("list_classes", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "list_classes").await,
        }
    }

    /// Retraining/predicting entry: the id must exist in the current model
    /// catalog or no session is created.
    async fn handle_dialogue_entry(
        &self,
        chat: ChatId,
        kind: DialogueKind,
        id: ModelId,
    ) -> Result<(), DialogueError> {
        match self.backend.list_models().await {
            Ok(ApiOutcome::Success(catalog)) => {
                self.hooks.on_backend_outcome("list_models", "success");
                if !catalog.contains_key(id.as_str()) {
                    return self.refuse(chat, "invalid_model_id", replies::INVALID_MODEL_ID).await;
                }

                self.say(chat, replies::FEATURES_UPLOAD).await?;
                let session =
                    Session::new(kind, Stage::FeatureUpload, Vec::new()).with_target_model(id);
                self.store.create(chat, session)?;
                self.hooks.on_session_created(chat, kind);
                Ok(())
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("list_models", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "list_models").await,
        }
    }

    /// Deleting is single-shot: no session on either outcome.
    async fn handle_delete(&self, chat: ChatId, id: ModelId) -> Result<(), DialogueError> {
        match self.backend.delete_model(id.clone()).await {
            Ok(ApiOutcome::Success(_)) => {
                self.hooks.on_backend_outcome("delete_model", "success");
                self.say(chat, &replies::model_deleted(&id)).await
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("delete_model", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "delete_model").await,
        }
    }

    /// A class was picked: its parameter list becomes the loop's choices.
    /// On backend failure the stage stays at `ModelChoice` for a retry.
    async fn handle_model_choice(&self, chat: ChatId, class: String) -> Result<(), DialogueError> {
        match self.backend.list_parameters().await {
            Ok(ApiOutcome::Success(parameters)) => {
                self.hooks.on_backend_outcome("list_parameters", "success");
                let names = parameters.get(&class).cloned().unwrap_or_default();
                self.store.set_model_class(chat, &class)?;
                self.store.advance(chat, Stage::ParamChoice, Some(names.clone()))?;
                let keyboard = with_sentinel(&names);
                self.offer(chat, replies::PARAM_CHOICE, &keyboard).await
            }
            Ok(ApiOutcome::Rejected(meta)) => {
                self.hooks.on_backend_outcome("list_parameters", "rejected");
                self.say(chat, &render_meta(&meta)).await
            }
            Err(_) => self.backend_unavailable(chat, "list_parameters").await,
        }
    }

    async fn handle_param_choice(&self, chat: ChatId, name: String) -> Result<(), DialogueError> {
        self.store.set_selection(chat, name)?;
        self.store.advance(chat, Stage::ParamValue, None)?;
        self.offer(chat, replies::PARAM_VALUE, &[]).await
    }

    async fn handle_params_done(&self, chat: ChatId) -> Result<(), DialogueError> {
        self.store.advance(chat, Stage::FeatureUpload, None)?;
        self.offer(chat, replies::FEATURES_UPLOAD, &[]).await
    }

    /// Records `parameters[selection] = value` and returns to the choice
    /// step with the same parameter list — values may be overwritten.
    async fn handle_param_value(
        &self,
        chat: ChatId,
        session: &Session,
        value: String,
    ) -> Result<(), DialogueError> {
        let Some(name) = session.current_selection.clone() else {
            return self.refuse(chat, "invalid_input", replies::INVALID_INPUT).await;
        };

        self.store.record_parameter(chat, name, value)?;
        self.store.advance(chat, Stage::ParamChoice, None)?;
        let keyboard = with_sentinel(&session.choices);
        self.offer(chat, replies::PARAM_CHOICE, &keyboard).await
    }

    /// Shared upload step for all three kinds. The size precondition runs on
    /// the declared attachment size before anything is downloaded; every
    /// failure leaves the stage unchanged for an immediate retry.
    async fn handle_upload(
        &self,
        chat: ChatId,
        session: &Session,
        document: DocumentRef,
    ) -> Result<(), DialogueError> {
        if check_size(document.size).is_err() {
            return self.refuse(chat, "file_too_large", replies::FILE_TOO_LARGE).await;
        }

        let bytes = match self.transport.fetch_document(&document).await {
            Ok(bytes) => bytes,
            Err(_) => return self.refuse(chat, "fetch_failed", replies::FETCH_FAILED).await,
        };

        match session.stage {
            Stage::FeatureUpload => self.handle_features_upload(chat, session, &bytes).await,
            Stage::TargetUpload => self.handle_target_upload(chat, session, &bytes).await,
            _ => self.refuse(chat, "invalid_input", replies::INVALID_INPUT).await,
        }
    }

    async fn handle_features_upload(
        &self,
        chat: ChatId,
        session: &Session,
        bytes: &[u8],
    ) -> Result<(), DialogueError> {
        let features = match parse_features(bytes) {
            Ok(features) => features,
            Err(_) => return self.refuse(chat, "unparsable_file", replies::NOT_CSV).await,
        };

        self.store.set_features(chat, features.clone())?;

        match session.kind {
            DialogueKind::Training | DialogueKind::Retraining => {
                self.store.advance(chat, Stage::TargetUpload, None)?;
                self.say(chat, replies::TARGET_UPLOAD).await
            }
            DialogueKind::Predicting => {
                let Some(model) = session.target_model.clone() else {
                    return Err(DialogueError::internal(
                        "predicting session without a target model",
                    ));
                };

                let request = PredictRequest { features };
                match self.backend.predict(model, request).await {
                    Ok(ApiOutcome::Success(prediction)) => {
                        self.hooks.on_backend_outcome("predict", "success");
                        self.deliver_prediction(chat, &prediction).await?;
                        self.clear_session(chat)
                    }
                    Ok(ApiOutcome::Rejected(meta)) => {
                        self.hooks.on_backend_outcome("predict", "rejected");
                        self.say(chat, &render_meta(&meta)).await?;
                        self.clear_session(chat)
                    }
                    // Session stays at the upload stage; resending the file
                    // retries the prediction.
                    Err(_) => self.backend_unavailable(chat, "predict").await,
                }
            }
        }
    }

    async fn handle_target_upload(
        &self,
        chat: ChatId,
        session: &Session,
        bytes: &[u8],
    ) -> Result<(), DialogueError> {
        let target = match parse_target(bytes) {
            Ok(target) => target,
            Err(_) => return self.refuse(chat, "unparsable_file", replies::NOT_CSV).await,
        };

        self.store.set_target(chat, target)?;
        let Some(session) = self.store.get(chat)? else {
            return Err(DialogueError::internal("session vanished at terminal stage"));
        };

        let outcome = match session.kind {
            DialogueKind::Training => {
                let request = train_request(&session.draft)?;
                ("create_model", self.backend.create_model(request).await)
            }
            DialogueKind::Retraining => {
                let Some(model) = session.target_model.clone() else {
                    return Err(DialogueError::internal(
                        "retraining session without a target model",
                    ));
                };
                let request = retrain_request(&session.draft)?;
                ("retrain_model", self.backend.retrain_model(model, request).await)
            }
            DialogueKind::Predicting => {
                return Err(DialogueError::internal(
                    "predicting dialogue has no target stage",
                ));
            }
        };

        match outcome {
            (operation, Ok(ApiOutcome::Success(descriptor))) => {
                self.hooks.on_backend_outcome(operation, "success");
                self.say(chat, &render_pretty(&descriptor)).await?;
                self.clear_session(chat)
            }
            (operation, Ok(ApiOutcome::Rejected(meta))) => {
                self.hooks.on_backend_outcome(operation, "rejected");
                self.say(chat, &render_meta(&meta)).await?;
                self.clear_session(chat)
            }
            // The accumulated uploads stay; the user resends the target file
            // once the backend is reachable.
            (operation, Err(_)) => self.backend_unavailable(chat, operation).await,
        }
    }

    async fn handle_cancel(&self, chat: ChatId) -> Result<(), DialogueError> {
        self.offer(chat, replies::EXIT_ACK, &[]).await?;
        self.clear_session(chat)
    }

    /// Materialize the prediction, deliver it, then remove the artifact —
    /// removal happens whether or not the delivery succeeded.
    async fn deliver_prediction(&self, chat: ChatId, prediction: &Series) -> Result<(), DialogueError> {
        let bytes =
            series_to_csv(prediction).map_err(|err| DialogueError::internal(err.to_string()))?;
        let file_name = format!("{chat}_pred.csv");
        let path = self.storage_dir.join(&file_name);

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|err| DialogueError::internal(err.to_string()))?;

        let delivery = self
            .transport
            .send_document(chat, &file_name, bytes, replies::PREDICTION_CAPTION)
            .await;
        let removal = tokio::fs::remove_file(&path).await;

        delivery?;
        removal.map_err(|err| DialogueError::internal(err.to_string()))?;
        Ok(())
    }

    // The cleared hook fires only when a session actually existed; `/exit`
    // in the standard state must not touch session gauges.
    fn clear_session(&self, chat: ChatId) -> Result<(), DialogueError> {
        if self.store.clear(chat)? {
            self.hooks.on_session_cleared(chat);
        }

        Ok(())
    }

    async fn backend_unavailable(
        &self,
        chat: ChatId,
        operation: &'static str,
    ) -> Result<(), DialogueError> {
        self.hooks.on_backend_outcome(operation, "unavailable");
        self.say(chat, replies::API_UNAVAILABLE).await
    }

    async fn refuse(
        &self,
        chat: ChatId,
        reason: &'static str,
        text: &str,
    ) -> Result<(), DialogueError> {
        self.hooks.on_user_error(chat, reason);
        self.say(chat, text).await
    }

    async fn say(&self, chat: ChatId, text: &str) -> Result<(), DialogueError> {
        self.transport.send_text(chat, text).await?;
        Ok(())
    }

    async fn offer(&self, chat: ChatId, text: &str, choices: &[String]) -> Result<(), DialogueError> {
        self.transport.send_choices(chat, text, choices).await?;
        Ok(())
    }
}

fn with_sentinel(names: &[String]) -> Vec<String> {
    let mut keyboard = names.to_vec();
    keyboard.push(DONE_SENTINEL.to_string());
    keyboard
}

fn train_request(draft: &DraftPayload) -> Result<TrainRequest, DialogueError> {
    let DraftPayload::Training {
        model_class,
        parameters,
        features,
        target,
    } = draft
    else {
        return Err(DialogueError::internal("training stage with a foreign draft"));
    };

    let (Some(model_class), Some(features), Some(target)) =
        (model_class.clone(), features.clone(), target.clone())
    else {
        return Err(DialogueError::internal("training draft incomplete at terminal stage"));
    };

    Ok(TrainRequest {
        model_class,
        parameters: parameters.clone(),
        features,
        target,
    })
}

fn retrain_request(draft: &DraftPayload) -> Result<RetrainRequest, DialogueError> {
    let DraftPayload::Retraining { features, target } = draft else {
        return Err(DialogueError::internal("retraining stage with a foreign draft"));
    };

    let (Some(features), Some(target)) = (features.clone(), target.clone()) else {
        return Err(DialogueError::internal("retraining draft incomplete at terminal stage"));
    };

    Ok(RetrainRequest { features, target })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use rcommon::BoxFuture;
    use rgateway::{BackendResult, ErrorMeta, GatewayError, GatewayFuture, ModelCatalog};

    use super::*;
    use crate::TransportError;

    #[derive(Debug, Default)]
    struct FakeTransport {
        texts: Mutex<Vec<(ChatId, String)>>,
        prompts: Mutex<Vec<(ChatId, String, Vec<String>)>>,
        documents: Mutex<Vec<(ChatId, String, Vec<u8>, String)>>,
        fetch_body: Mutex<Option<Vec<u8>>>,
    }

    impl FakeTransport {
        fn sent_texts(&self) -> Vec<String> {
            self.texts
                .lock()
                .expect("texts lock")
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    impl ChatTransport for FakeTransport {
        fn send_text<'a>(
            &'a self,
            chat: ChatId,
            text: &'a str,
        ) -> BoxFuture<'a, Result<(), TransportError>> {
            Box::pin(async move {
                self.texts
                    .lock()
                    .expect("texts lock")
                    .push((chat, text.to_string()));
                Ok(())
            })
        }

        fn send_choices<'a>(
            &'a self,
            chat: ChatId,
            text: &'a str,
            choices: &'a [String],
        ) -> BoxFuture<'a, Result<(), TransportError>> {
            Box::pin(async move {
                self.prompts
                    .lock()
                    .expect("prompts lock")
                    .push((chat, text.to_string(), choices.to_vec()));
                Ok(())
            })
        }

        fn send_document<'a>(
            &'a self,
            chat: ChatId,
            file_name: &'a str,
            bytes: Vec<u8>,
            caption: &'a str,
        ) -> BoxFuture<'a, Result<(), TransportError>> {
            Box::pin(async move {
                self.documents.lock().expect("documents lock").push((
                    chat,
                    file_name.to_string(),
                    bytes,
                    caption.to_string(),
                ));
                Ok(())
            })
        }

        fn fetch_document<'a>(
            &'a self,
            _document: &'a DocumentRef,
        ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
            Box::pin(async move {
                self.fetch_body
                    .lock()
                    .expect("fetch lock")
                    .clone()
                    .ok_or_else(|| TransportError::new("no fetch body configured"))
            })
        }
    }

    #[derive(Debug)]
    struct FakeBackend {
        catalog: BackendResult<ModelCatalog>,
        classes: BackendResult<Vec<String>>,
        delete: BackendResult<Value>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self {
                catalog: Ok(ApiOutcome::Success(ModelCatalog::new())),
                classes: Ok(ApiOutcome::Success(Vec::new())),
                delete: Ok(ApiOutcome::Success(Value::Null)),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl FakeBackend {
        fn record(&self, call: &'static str) {
            self.calls.lock().expect("calls lock").push(call);
        }
    }

    impl ModelBackend for FakeBackend {
        fn list_models<'a>(&'a self) -> GatewayFuture<'a, BackendResult<ModelCatalog>> {
            Box::pin(async move {
                self.record("list_models");
                self.catalog.clone()
            })
        }

        fn list_classes<'a>(&'a self) -> GatewayFuture<'a, BackendResult<Vec<String>>> {
            Box::pin(async move {
                self.record("list_classes");
                self.classes.clone()
            })
        }

        fn list_parameters<'a>(
            &'a self,
        ) -> GatewayFuture<'a, BackendResult<BTreeMap<String, Vec<String>>>> {
            Box::pin(async move {
                self.record("list_parameters");
                Ok(ApiOutcome::Success(BTreeMap::new()))
            })
        }

        fn create_model<'a>(
            &'a self,
            _request: TrainRequest,
        ) -> GatewayFuture<'a, BackendResult<Value>> {
            Box::pin(async move {
                self.record("create_model");
                Ok(ApiOutcome::Success(Value::Null))
            })
        }

        fn retrain_model<'a>(
            &'a self,
            _id: ModelId,
            _request: RetrainRequest,
        ) -> GatewayFuture<'a, BackendResult<Value>> {
            Box::pin(async move {
                self.record("retrain_model");
                Ok(ApiOutcome::Success(Value::Null))
            })
        }

        fn delete_model<'a>(&'a self, _id: ModelId) -> GatewayFuture<'a, BackendResult<Value>> {
            Box::pin(async move {
                self.record("delete_model");
                self.delete.clone()
            })
        }

        fn predict<'a>(
            &'a self,
            _id: ModelId,
            _request: PredictRequest,
        ) -> GatewayFuture<'a, BackendResult<Series>> {
            Box::pin(async move {
                self.record("predict");
                Ok(ApiOutcome::Success(Series::new()))
            })
        }
    }

    fn engine_with(
        backend: FakeBackend,
        transport: Arc<FakeTransport>,
    ) -> (DialogueEngine, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let engine = DialogueEngine::builder(Arc::new(backend), transport)
            .store(Arc::clone(&store))
            .build();
        (engine, store)
    }

    #[tokio::test]
    async fn unknown_text_in_standard_state_gets_the_fallback_reply() {
        let transport = Arc::new(FakeTransport::default());
        let (engine, store) = engine_with(FakeBackend::default(), Arc::clone(&transport));

        let chat = ChatId::new(1);
        engine
            .handle_event(IncomingEvent::text(chat, "what can you do?"))
            .await
            .expect("event handled");

        assert_eq!(transport.sent_texts(), vec![replies::INVALID_INPUT.to_string()]);
        assert_eq!(store.get(chat).expect("get"), None);
    }

    #[tokio::test]
    async fn help_and_start_send_the_command_listing() {
        let transport = Arc::new(FakeTransport::default());
        let (engine, _) = engine_with(FakeBackend::default(), Arc::clone(&transport));

        let chat = ChatId::new(2);
        engine
            .handle_event(IncomingEvent::text(chat, "/help"))
            .await
            .expect("help handled");
        engine
            .handle_event(IncomingEvent::text(chat, "/start"))
            .await
            .expect("start handled");

        let texts = transport.sent_texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("/train - start the model training dialogue"));
        assert_eq!(texts[0], texts[1]);
    }

    #[tokio::test]
    async fn delete_reports_success_with_the_model_id() {
        let transport = Arc::new(FakeTransport::default());
        let (engine, store) = engine_with(FakeBackend::default(), Arc::clone(&transport));

        let chat = ChatId::new(3);
        engine
            .handle_event(IncomingEvent::text(chat, "/delete 7"))
            .await
            .expect("delete handled");

        assert_eq!(transport.sent_texts(), vec!["The model 7 was deleted".to_string()]);
        assert_eq!(store.get(chat).expect("get"), None);
    }

    #[tokio::test]
    async fn delete_rejection_renders_the_meta_message() {
        let backend = FakeBackend {
            delete: Ok(ApiOutcome::Rejected(ErrorMeta::Message(
                "No such model".to_string(),
            ))),
            ..FakeBackend::default()
        };
        let transport = Arc::new(FakeTransport::default());
        let (engine, _) = engine_with(backend, Arc::clone(&transport));

        engine
            .handle_event(IncomingEvent::text(ChatId::new(4), "/delete 9"))
            .await
            .expect("delete handled");

        assert_eq!(transport.sent_texts(), vec!["No such model".to_string()]);
    }

    #[tokio::test]
    async fn train_entry_fails_closed_when_the_backend_is_down() {
        let backend = FakeBackend {
            classes: Err(GatewayError::transport("connection refused")),
            ..FakeBackend::default()
        };
        let transport = Arc::new(FakeTransport::default());
        let (engine, store) = engine_with(backend, Arc::clone(&transport));

        let chat = ChatId::new(5);
        engine
            .handle_event(IncomingEvent::text(chat, "/train"))
            .await
            .expect("train handled");

        assert_eq!(transport.sent_texts(), vec![replies::API_UNAVAILABLE.to_string()]);
        assert_eq!(store.get(chat).expect("get"), None);
    }

    #[tokio::test]
    async fn exit_with_a_session_acknowledges_and_clears_it() {
        let transport = Arc::new(FakeTransport::default());
        let (engine, store) = engine_with(FakeBackend::default(), Arc::clone(&transport));

        let chat = ChatId::new(6);
        store
            .create(
                chat,
                Session::new(DialogueKind::Retraining, Stage::FeatureUpload, Vec::new())
                    .with_target_model(ModelId::from("1")),
            )
            .expect("create");

        engine
            .handle_event(IncomingEvent::text(chat, "/exit"))
            .await
            .expect("exit handled");

        let prompts = transport.prompts.lock().expect("prompts lock");
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].1, replies::EXIT_ACK);
        assert!(prompts[0].2.is_empty(), "exit clears the picker");
        assert_eq!(store.get(chat).expect("get"), None);
    }

    #[derive(Debug, Default)]
    struct CountingHooks {
        cleared: Mutex<Vec<ChatId>>,
    }

    impl DialogueHooks for CountingHooks {
        fn on_session_cleared(&self, chat: ChatId) {
            self.cleared.lock().expect("cleared lock").push(chat);
        }
    }

    #[tokio::test]
    async fn cleared_hook_fires_only_for_sessions_that_existed() {
        let transport = Arc::new(FakeTransport::default());
        let store = Arc::new(SessionStore::new());
        let hooks = Arc::new(CountingHooks::default());
        let engine = DialogueEngine::builder(
            Arc::new(FakeBackend::default()),
            Arc::clone(&transport) as Arc<dyn ChatTransport>,
        )
        .store(Arc::clone(&store))
        .hooks(Arc::clone(&hooks) as Arc<dyn DialogueHooks>)
        .build();

        let chat = ChatId::new(10);
        engine
            .handle_event(IncomingEvent::text(chat, "/exit"))
            .await
            .expect("standard-state exit handled");
        assert!(
            hooks.cleared.lock().expect("cleared lock").is_empty(),
            "nothing existed to clear"
        );

        store
            .create(
                chat,
                Session::new(DialogueKind::Retraining, Stage::FeatureUpload, Vec::new())
                    .with_target_model(ModelId::from("1")),
            )
            .expect("create");
        engine
            .handle_event(IncomingEvent::text(chat, "/exit"))
            .await
            .expect("exit handled");

        assert_eq!(*hooks.cleared.lock().expect("cleared lock"), vec![chat]);
    }

    #[tokio::test]
    async fn oversized_documents_never_reach_fetch_or_ingestion() {
        let transport = Arc::new(FakeTransport::default());
        let (engine, store) = engine_with(FakeBackend::default(), Arc::clone(&transport));

        let chat = ChatId::new(7);
        store
            .create(
                chat,
                Session::new(DialogueKind::Retraining, Stage::FeatureUpload, Vec::new())
                    .with_target_model(ModelId::from("1")),
            )
            .expect("create");

        let oversized = DocumentRef::new(rtable::MAX_UPLOAD_BYTES + 1, "url");
        engine
            .handle_event(IncomingEvent::document(chat, oversized))
            .await
            .expect("upload handled");

        assert_eq!(transport.sent_texts(), vec![replies::FILE_TOO_LARGE.to_string()]);
        let session = store.get(chat).expect("get").expect("session kept");
        assert_eq!(session.stage, Stage::FeatureUpload);
        let DraftPayload::Retraining { features, .. } = session.draft else {
            panic!("retraining draft expected");
        };
        assert_eq!(features, None, "nothing was ingested");
    }

    #[tokio::test]
    async fn unfetchable_documents_leave_the_stage_for_a_retry() {
        let transport = Arc::new(FakeTransport::default());
        let (engine, store) = engine_with(FakeBackend::default(), Arc::clone(&transport));

        let chat = ChatId::new(8);
        store
            .create(
                chat,
                Session::new(DialogueKind::Predicting, Stage::FeatureUpload, Vec::new())
                    .with_target_model(ModelId::from("1")),
            )
            .expect("create");

        engine
            .handle_event(IncomingEvent::document(chat, DocumentRef::new(10, "url")))
            .await
            .expect("upload handled");

        assert_eq!(transport.sent_texts(), vec![replies::FETCH_FAILED.to_string()]);
        let session = store.get(chat).expect("get").expect("session kept");
        assert_eq!(session.stage, Stage::FeatureUpload);
    }
}

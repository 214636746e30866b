use async_graphql::{Context, EmptySubscription, Object, Schema as GraphQLSchema, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppResult,
    models::dto::{
        request::{answers_to_map, ChatRequest, QuestionAnswerInput},
        response::{ChatReplyDto, ExchangeDto, QuizDto, QuizResultDto, UserDto},
    },
};

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn me(&self, ctx: &Context<'_>) -> AppResult<UserDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let user = state.user_service.get_user_by_id(&claims.sub).await?;
        Ok(UserDto::from(user))
    }

    async fn chat_history(&self, ctx: &Context<'_>) -> AppResult<Vec<ExchangeDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let history = state.chat_service.get_history(&claims).await?;
        Ok(history.into_iter().map(ExchangeDto::from).collect())
    }

    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> AppResult<QuizDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let quiz = state.quiz_service.get_quiz_for_user(&id, &claims).await?;
        Ok(QuizDto::from(quiz))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn send_message(&self, ctx: &Context<'_>, input: ChatRequest) -> AppResult<ChatReplyDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;
        input.validate()?;

        let reply = state.chat_service.send_message(&claims, &input.message).await?;
        Ok(ChatReplyDto { reply })
    }

    async fn generate_quiz(&self, ctx: &Context<'_>) -> AppResult<QuizDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let quiz = state.quiz_service.generate_quiz(&claims).await?;
        Ok(QuizDto::from(quiz))
    }

    async fn submit_quiz_attempt(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        answers: Vec<QuestionAnswerInput>,
    ) -> AppResult<QuizResultDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let answers = answers_to_map(answers);
        let (quiz, attempt) = state
            .quiz_attempt_service
            .submit_attempt(&claims, &quiz_id, &answers)
            .await?;

        Ok(QuizResultDto::from_attempt(&quiz, &attempt))
    }
}

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}

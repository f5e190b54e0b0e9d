//! # Tool Router Module
//!
//! Handles routing of MCP tool calls to the service methods, and turns common
//! argument mistakes into pointed `invalid_params` hints.

use crate::docstub_service::DocStubService;
use crate::response_formatter::ResponseFormatter;
use crate::tools::ToolService;
use crate::types::*;

use rmcp::model::{CallToolRequestParam, CallToolResult, ErrorData};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Routes tool calls to appropriate service methods
pub struct ToolRouter;

impl ToolRouter {
    fn parse_params<T: DeserializeOwned>(request: &CallToolRequestParam) -> Result<T, ErrorData> {
        ToolService::parse_param(request)
    }

    fn create_formatted_response<T: serde::Serialize>(
        result: &T,
        summary: String,
    ) -> Result<CallToolResult, ErrorData> {
        ResponseFormatter::create_formatted_response(result, summary)
            .map_err(|e| ErrorData::internal_error(Cow::Owned(e.to_string()), None))
    }

    fn has_argument(request: &CallToolRequestParam, key: &str) -> bool {
        request
            .arguments
            .as_ref()
            .is_some_and(|args| args.contains_key(key))
    }

    /// Route a tool call to the appropriate service method
    pub async fn route_tool_call(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        match request.name.as_ref() {
            // Stub operations
            "generate_stub" => Self::handle_generate_stub(service, request).await,
            "file_stub" => Self::handle_file_stub(service, request).await,
            "analyze_function" => Self::handle_analyze_function(service, request).await,
            "continue_comment" => Self::handle_continue_comment(service, request).await,

            // Options
            "get_options" => Self::handle_get_options(service, request).await,
            "reload_options" => Self::handle_reload_options(service, request).await,

            // Utility operations
            "list_languages" => Self::handle_list_languages(service, request).await,
            "documentation" => {
                ToolService::create_success_result(&ToolService::get_documentation())
            }

            _ => Err(ErrorData::method_not_found::<
                rmcp::model::CallToolRequestMethod,
            >()),
        }
    }

    async fn handle_generate_stub(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        // An LLM may pass a file path to the snippet tool.
        if Self::has_argument(&request, "path") && !Self::has_argument(&request, "code") {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed(
                    "The 'generate_stub' tool works on a 'code' snippet. To generate a stub inside a file, use the 'file_stub' tool with a 'path'.",
                ),
                None,
            ));
        }
        let param: GenerateStubParam = Self::parse_params(&request)?;

        if param.code.is_empty() {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed(
                    "The 'generate_stub' tool requires non-empty 'code' containing the comment trigger (/** or ///) and the function.",
                ),
                None,
            ));
        }

        let result = service.generate_stub(param).await.map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_stub_result(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_file_stub(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        if Self::has_argument(&request, "code") {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed(
                    "The 'file_stub' tool reads the file at 'path' and does not accept 'code'. For a code snippet, use the 'generate_stub' tool.",
                ),
                None,
            ));
        }
        let param: FileStubParam = Self::parse_params(&request)?;

        if param.path.is_empty() {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed("The 'file_stub' tool requires the 'path' parameter."),
                None,
            ));
        }

        let result = service.file_stub(param).await.map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_file_stub_result(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_analyze_function(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        if !Self::has_argument(&request, "direction") {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed(
                    "The 'analyze_function' tool requires 'direction': \"above\" when the comment sits on the line before the function, \"inside\" when it is the first line of the body.",
                ),
                None,
            ));
        }
        let param: AnalyzeFunctionParam = Self::parse_params(&request)?;

        let result = service
            .analyze_function(param)
            .await
            .map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_analyze_result(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_continue_comment(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: ContinueCommentParam = Self::parse_params(&request)?;
        let result = service
            .continue_comment(param)
            .await
            .map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_continuation(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_list_languages(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: ListLanguagesParam = Self::parse_params(&request)?;
        let result = service
            .list_languages(param)
            .await
            .map_err(ErrorData::from)?;
        ToolService::create_success_result(&result)
    }

    async fn handle_get_options(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: GetOptionsParam = Self::parse_params(&request)?;
        let result = service.get_options(param).await.map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_options(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_reload_options(
        service: &DocStubService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: ReloadOptionsParam = Self::parse_params(&request)?;
        let result = service
            .reload_options(param)
            .await
            .map_err(ErrorData::from)?;
        let summary = format!("Reloaded. {}", ResponseFormatter::format_options(&result));
        Self::create_formatted_response(&result, summary)
    }
}

use crate::buffer::{LineBuffer, SourcePosition};
use crate::config::ServiceConfig;
use crate::engine::{StubEngine, StubQuery};
use crate::errors::ServiceError;
use crate::path_validation::resolve_file_within_roots;
use crate::render::{CommentStyle, StubRenderer};
use crate::scanner::Dialect;
use crate::stub_config::{OptionsSource, OptionsStore, StubOptions};
use crate::tool_router::ToolRouter;
use crate::tools::ToolService;
use crate::trigger::{continue_comment, detect_trigger};
use crate::types::*;

use rmcp::{
    ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorData, Implementation, InitializeResult,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
    },
    service::{RequestContext, RoleServer},
};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone)]
pub struct DocStubService {
    config: ServiceConfig,
    options: OptionsStore,
}

impl Default for DocStubService {
    fn default() -> Self {
        Self::new()
    }
}

impl DocStubService {
    /// Default configuration with built-in options; reads no options file.
    pub fn new() -> Self {
        Self::with_options(ServiceConfig::default(), StubOptions::default())
    }

    /// Loads options from `config.options_file`, or discovers `.docstub.yml`
    /// upward from the first root directory.
    pub fn with_config(config: ServiceConfig) -> Result<Self, ServiceError> {
        let source = match &config.options_file {
            Some(path) => OptionsSource::File(path.clone()),
            None => OptionsSource::Discover(
                config
                    .root_directories
                    .first()
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(".")),
            ),
        };
        let options = OptionsStore::load(source)?;
        Ok(Self { config, options })
    }

    pub fn with_options(config: ServiceConfig, options: StubOptions) -> Self {
        Self {
            config,
            options: OptionsStore::fixed(options),
        }
    }

    fn parse_dialect(language: &str) -> Result<Dialect, ServiceError> {
        Dialect::from_language(language)
            .ok_or_else(|| ServiceError::UnsupportedLanguage(language.to_string()))
    }

    #[tracing::instrument(skip(self, param), fields(language = %param.language, direction = ?param.direction))]
    pub async fn analyze_function(
        &self,
        param: AnalyzeFunctionParam,
    ) -> Result<AnalyzeFunctionResult, ServiceError> {
        let dialect = Self::parse_dialect(&param.language)?;
        let buffer = LineBuffer::new(param.code);
        let position = param.cursor.resolve(&buffer)?;
        let return_policy = param
            .return_tag
            .unwrap_or_else(|| self.options.snapshot().return_tag);

        let result = StubEngine::new(&buffer).resolve(&StubQuery {
            position,
            direction: param.direction,
            dialect,
            return_policy,
        });

        Ok(AnalyzeFunctionResult {
            dialect,
            direction: param.direction,
            declaration_line: result.declaration_line,
            parameters: result.parameters,
            needs_return_tag: result.needs_return_tag,
        })
    }

    #[tracing::instrument(skip(self, param), fields(language = %param.language, style = ?param.style))]
    pub async fn generate_stub(
        &self,
        param: GenerateStubParam,
    ) -> Result<GenerateStubResult, ServiceError> {
        let dialect = Self::parse_dialect(&param.language)?;
        let buffer = LineBuffer::new(param.code);
        let position = param.cursor.resolve(&buffer)?;
        Ok(self.stub_at(&buffer, dialect, position, param.style))
    }

    #[tracing::instrument(skip(self, param), fields(path = %param.path))]
    pub async fn file_stub(&self, param: FileStubParam) -> Result<FileStubResult, ServiceError> {
        let path = resolve_file_within_roots(&param.path, &self.config.root_directories)?;

        let size = tokio::fs::metadata(&path).await?.len();
        if size > self.config.max_file_size {
            return Err(ServiceError::FileTooLarge {
                path,
                size,
                limit: self.config.max_file_size,
            });
        }

        let dialect = match &param.language {
            Some(language) => Self::parse_dialect(language)?,
            None => Dialect::from_extension(&path).ok_or_else(|| {
                ServiceError::UnsupportedLanguage(Self::display_extension(&path))
            })?,
        };

        let content = tokio::fs::read_to_string(&path).await?;
        let buffer = LineBuffer::new(content);
        let position = param.cursor.resolve(&buffer)?;
        let stub = self.stub_at(&buffer, dialect, position, param.style);

        Ok(FileStubResult {
            file_path: path.to_string_lossy().to_string(),
            stub,
        })
    }

    #[tracing::instrument(skip(self, param))]
    pub async fn continue_comment(
        &self,
        param: ContinueCommentParam,
    ) -> Result<ContinueCommentResult, ServiceError> {
        let buffer = LineBuffer::new(param.code);
        let position = param.cursor.resolve(&buffer)?;
        let options = self.options.snapshot();

        Ok(match continue_comment(&buffer, position, &options) {
            Some(continuation) => ContinueCommentResult {
                continued: true,
                style: Some(continuation.style),
                text: Some(continuation.text),
            },
            None => ContinueCommentResult::default(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_options(&self, _param: GetOptionsParam) -> Result<OptionsResult, ServiceError> {
        Ok(OptionsResult {
            options_file: self.options_file(),
            options: self.options.snapshot().as_ref().clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn reload_options(
        &self,
        _param: ReloadOptionsParam,
    ) -> Result<OptionsResult, ServiceError> {
        let options = self.options.reload()?;
        Ok(OptionsResult {
            options_file: self.options_file(),
            options: options.as_ref().clone(),
        })
    }

    pub async fn list_languages(
        &self,
        _param: ListLanguagesParam,
    ) -> Result<ListLanguagesResult, ServiceError> {
        Ok(ToolService::list_languages())
    }

    /// Detects or applies the comment style, runs the engine and renders the
    /// edit. A missing trigger or disabled style yields an empty result.
    fn stub_at(
        &self,
        buffer: &LineBuffer,
        dialect: Dialect,
        position: SourcePosition,
        style: Option<CommentStyle>,
    ) -> GenerateStubResult {
        let options = self.options.snapshot();
        let style = match style {
            Some(style) => style.is_enabled(&options).then_some(style),
            None => detect_trigger(buffer, position, &options),
        };
        let Some(style) = style else {
            debug!("no enabled comment trigger at cursor");
            return GenerateStubResult::default();
        };

        let result = StubEngine::new(buffer).resolve(&StubQuery {
            position,
            direction: style.direction(),
            dialect,
            return_policy: options.return_tag,
        });
        let edit = StubRenderer::new(buffer, &options).edit(style, dialect, position, &result);

        GenerateStubResult {
            style: Some(style),
            declaration_line: result.declaration_line,
            parameters: result.parameters,
            needs_return_tag: result.needs_return_tag,
            edit,
        }
    }

    fn options_file(&self) -> Option<String> {
        self.options
            .path()
            .map(|path| path.to_string_lossy().to_string())
    }

    fn display_extension(path: &Path) -> String {
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl ServerHandler for DocStubService {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "docstub-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            capabilities: ServerCapabilities {
                tools: Some(rmcp::model::ToolsCapability { list_changed: Some(true) }),
                ..Default::default()
            },
            instructions: Some("This MCP server writes JSDoc (/**) and VSDoc (///) comment stubs for JavaScript and TypeScript functions. Use generate_stub with the cursor right after the trigger characters. Use the `documentation` tool for detailed examples.".into()),
        }
    }

    #[tracing::instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ToolService::list_tools())
    }

    #[tracing::instrument(skip(self, request, _context), fields(tool_name = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        ToolRouter::route_tool_call(self, request).await
    }
}

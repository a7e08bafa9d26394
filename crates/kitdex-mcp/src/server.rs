//! MCP server implementation for kitdex

use std::sync::Arc;

use kitdex_core::{Catalog, ComponentService, Config};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};

use crate::error::{McpError, McpResult};
use crate::tools;

const INSTRUCTIONS: &str = "Query Composer Kit UI components: list them, look one up by name, \
    search by keyword or category, read props and examples, and get installation steps.";

/// MCP server for kitdex
#[derive(Clone)]
pub struct McpServer {
    service: Arc<ComponentService>,
    tools: Arc<Vec<Tool>>,
}

impl McpServer {
    /// Create a server for the Composer Kit catalog
    pub fn new(config: Config) -> McpResult<Self> {
        Self::with_catalog(config, Catalog::default())
    }

    /// Create a server for an arbitrary catalog
    pub fn with_catalog(config: Config, catalog: Catalog) -> McpResult<Self> {
        let service = ComponentService::new(config, catalog)?;
        Ok(Self::from_service(Arc::new(service)))
    }

    /// Wrap an existing service, e.g. one shared with other front ends
    pub fn from_service(service: Arc<ComponentService>) -> Self {
        Self {
            service,
            tools: Arc::new(tools::tool_definitions()),
        }
    }

    /// Service answering tool calls
    pub fn service(&self) -> &ComponentService {
        &self.service
    }

    /// Tools advertised to clients
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Run a tool and wrap the outcome as a tool result.
    ///
    /// Unknown tools are protocol errors. Every other failure becomes an
    /// error result the client can show to the user.
    pub async fn handle_call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        match tools::invoke(&self.service, name, arguments).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(McpError::UnknownTool(tool)) => Err(ErrorData::invalid_params(
                format!("unknown tool: {tool}"),
                None,
            )),
            Err(e) if e.is_user_facing() => {
                tracing::debug!(tool = %name, error = %e, "tool rejected request");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            },
            Err(e) => {
                tracing::error!(tool = %name, code = e.error_code(), error = %e, "tool failed");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error in {name}: {e}"
                ))]))
            },
        }
    }

    /// Serve the MCP protocol over stdio
    pub async fn serve_stdio(&self) -> McpResult<()> {
        tracing::info!("kitdex MCP server starting");

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let service = rmcp::serve_server(self.clone(), (stdin, stdout))
            .await
            .map_err(|e| {
                tracing::error!("server initialization error: {}", e);
                McpError::Protocol(e.to_string())
            })?;

        service.waiting().await.map_err(|e| {
            tracing::error!("server runtime error: {}", e);
            McpError::Protocol(e.to_string())
        })?;

        tracing::info!("kitdex MCP server stopped");
        Ok(())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "kitdex-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.to_vec()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.handle_call(&request.name, request.arguments).await
    }
}
